//! Region and endpoint configuration.
//!
//! A [`Region`] pairs a region name with the EC2 endpoint serving it. Known AWS
//! regions can be looked up by name; anything else (a private cloud, a local
//! mock) is built with [`Region::new`].

use crate::Error;
use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

/// Regions with a well-known public EC2 endpoint.
pub const KNOWN_REGIONS: &[(&str, &str)] = &[
    ("us-east-1", "https://ec2.us-east-1.amazonaws.com"),
    ("us-west-1", "https://ec2.us-west-1.amazonaws.com"),
    ("us-west-2", "https://ec2.us-west-2.amazonaws.com"),
    ("eu-west-1", "https://ec2.eu-west-1.amazonaws.com"),
    ("ap-southeast-1", "https://ec2.ap-southeast-1.amazonaws.com"),
    ("ap-southeast-2", "https://ec2.ap-southeast-2.amazonaws.com"),
    ("ap-northeast-1", "https://ec2.ap-northeast-1.amazonaws.com"),
    ("sa-east-1", "https://ec2.sa-east-1.amazonaws.com"),
    ("us-gov-west-1", "https://ec2.us-gov-west-1.amazonaws.com"),
    ("cn-north-1", "https://ec2.cn-north-1.amazonaws.com.cn"),
];

/// An EC2 region and its endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Region {
    /// Region name (e.g. `us-east-1`)
    #[validate(length(min = 1))]
    pub name: String,

    /// EC2 endpoint base URL
    #[validate(url)]
    pub ec2_endpoint: String,
}

impl Region {
    /// Create a region with an explicit endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the endpoint is not a URL.
    pub fn new(name: impl Into<String>, ec2_endpoint: impl Into<String>) -> Result<Self, Error> {
        let region = Self {
            name: name.into(),
            ec2_endpoint: ec2_endpoint.into(),
        };

        region
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid region: {e}")))?;

        Ok(region)
    }

    /// Look up a well-known region by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the region is unknown.
    pub fn named(name: &str) -> Result<Self, Error> {
        KNOWN_REGIONS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(known, endpoint)| Self {
                name: (*known).to_string(),
                ec2_endpoint: (*endpoint).to_string(),
            })
            .ok_or_else(|| Error::ConfigError(format!("Unknown region: {name}")))
    }

    /// Parse the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or has no host.
    pub fn endpoint_url(&self) -> Result<Url, Error> {
        let url = Url::parse(&self.ec2_endpoint)?;
        if url.host_str().is_none() {
            return Err(Error::InvalidEndpoint(format!(
                "EC2 endpoint has no host: {}",
                self.ec2_endpoint
            )));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_new() {
        let region = Region::new("local", "http://127.0.0.1:4566").unwrap();
        assert_eq!(region.name, "local");
        assert_eq!(region.ec2_endpoint, "http://127.0.0.1:4566");
    }

    #[test]
    fn test_region_invalid_url() {
        assert!(Region::new("local", "not-a-url").is_err());
        assert!(Region::new("", "http://127.0.0.1").is_err());
    }

    #[test]
    fn test_region_named() {
        let region = Region::named("eu-west-1").unwrap();
        assert_eq!(region.ec2_endpoint, "https://ec2.eu-west-1.amazonaws.com");
        assert!(matches!(
            Region::named("mars-north-1"),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_known_regions_are_valid() {
        for (name, endpoint) in KNOWN_REGIONS {
            let region = Region::new(*name, *endpoint).unwrap();
            assert!(region.endpoint_url().is_ok());
        }
    }

    #[test]
    fn test_endpoint_url() {
        let region = Region::new("local", "http://localhost:8080/ec2").unwrap();
        let url = region.endpoint_url().unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.port(), Some(8080));
        assert_eq!(url.path(), "/ec2");
    }

    #[test]
    fn test_region_serialization() {
        let region = Region::named("us-west-2").unwrap();
        let json = serde_json::to_string(&region).unwrap();
        let deserialized: Region = serde_json::from_str(&json).unwrap();
        assert_eq!(region, deserialized);
    }
}
