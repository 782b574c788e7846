//! Asynchronous EC2 client implementation.

use crate::models::{
    CreateSecurityGroupResponse, CreateSnapshotResponse, DescribeAddressesResponse,
    DescribeImagesResponse, DescribeInstancesResponse, DescribeSecurityGroupsResponse,
    DescribeSnapshotsResponse, IpPermission, RunInstancesOptions, RunInstancesResponse,
    SecurityGroup, SimpleResponse, StartInstancesResponse, StopInstancesResponse, Tag,
    TerminateInstancesResponse,
};
use crate::Result;
use ec2_core::client::{Clock, ClientConfig, QueryClient, QueryClientBuilder};
use ec2_core::filter::encode_filter;
use ec2_core::query::EncodeParams;
use ec2_core::token::client_token;
use ec2_core::transport::Transport;
use ec2_core::{Credentials, Filter, Params, Region};
use std::sync::Arc;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("ec2-compute/", env!("CARGO_PKG_VERSION"));

/// Builder for [`Ec2Client`].
#[derive(Clone)]
pub struct Ec2ClientBuilder {
    inner: QueryClientBuilder,
}

impl Ec2ClientBuilder {
    /// Create a builder for the given credentials and region.
    #[must_use]
    pub fn new(credentials: Credentials, region: Region) -> Self {
        let builder = QueryClientBuilder::new(credentials, region).with_user_agent(USER_AGENT);
        Self { inner: builder }
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_http_config(config);
        self
    }

    /// Dump each request URL and raw response at debug level.
    #[must_use]
    pub fn with_debug_dump(mut self, enabled: bool) -> Self {
        self.inner = self.inner.with_debug_dump(enabled);
        self
    }

    /// Use a custom transport.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.inner = self.inner.with_transport(transport);
        self
    }

    /// Use a custom clock for request timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.inner = self.inner.with_clock(clock);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the region endpoint is invalid or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<Ec2Client> {
        let inner = self.inner.build()?;
        Ok(Ec2Client { inner })
    }
}

/// Asynchronous EC2 client.
///
/// Every operation returns the decoded response or the first error EC2
/// reported; nothing is retried.
#[derive(Clone)]
pub struct Ec2Client {
    inner: QueryClient,
}

impl Ec2Client {
    /// Construct a client with default HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the region endpoint is invalid.
    pub fn new(credentials: Credentials, region: Region) -> Result<Self> {
        Ec2ClientBuilder::new(credentials, region).build()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder(credentials: Credentials, region: Region) -> Ec2ClientBuilder {
        Ec2ClientBuilder::new(credentials, region)
    }

    /// The region this client talks to.
    #[must_use]
    pub const fn region(&self) -> &Region {
        self.inner.region()
    }

    /// The endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        self.inner.endpoint()
    }

    // -----------------------------------------------------------------------
    // Instances

    /// Launch instances.
    ///
    /// Each call carries a fresh `ClientToken`, so a retried launch is not
    /// deduplicated against an earlier one.
    pub async fn run_instances(&self, options: &RunInstancesOptions) -> Result<RunInstancesResponse> {
        let mut params = Params::new("RunInstances");
        options.encode_params(&mut params.root());
        params.insert("ClientToken", client_token()?);

        let resp: RunInstancesResponse = self.inner.query(params).await?;
        debug!(
            reservation_id = %resp.reservation_id,
            instances = resp.instances.len(),
            "launched EC2 instances"
        );
        Ok(resp)
    }

    /// Terminate instances.
    pub async fn terminate_instances(&self, ids: &[&str]) -> Result<TerminateInstancesResponse> {
        self.inner.query(instance_params("TerminateInstances", ids)).await
    }

    /// Start stopped EBS-backed instances.
    pub async fn start_instances(&self, ids: &[&str]) -> Result<StartInstancesResponse> {
        self.inner.query(instance_params("StartInstances", ids)).await
    }

    /// Stop running EBS-backed instances.
    pub async fn stop_instances(&self, ids: &[&str]) -> Result<StopInstancesResponse> {
        self.inner.query(instance_params("StopInstances", ids)).await
    }

    /// Reboot instances.
    pub async fn reboot_instances(&self, ids: &[&str]) -> Result<SimpleResponse> {
        self.inner.query(instance_params("RebootInstances", ids)).await
    }

    /// Describe instances, optionally narrowed by id and filter.
    ///
    /// EC2 reports the owner on the reservation only; it is copied onto each
    /// instance.
    pub async fn describe_instances(
        &self,
        ids: &[&str],
        filter: Option<&Filter>,
    ) -> Result<DescribeInstancesResponse> {
        let mut params = instance_params("DescribeInstances", ids);
        encode_filter(filter, &mut params);

        let mut resp: DescribeInstancesResponse = self.inner.query(params).await?;
        for reservation in &mut resp.reservations {
            for instance in &mut reservation.instances {
                instance.owner_id.clone_from(&reservation.owner_id);
            }
        }
        Ok(resp)
    }

    /// Describe Elastic IP addresses, optionally narrowed by instance and filter.
    pub async fn describe_addresses(
        &self,
        instance_ids: &[&str],
        filter: Option<&Filter>,
    ) -> Result<DescribeAddressesResponse> {
        let mut params = instance_params("DescribeAddresses", instance_ids);
        encode_filter(filter, &mut params);
        self.inner.query(params).await
    }

    // -----------------------------------------------------------------------
    // Images and snapshots

    /// Describe images, optionally narrowed by id and filter.
    pub async fn describe_images(
        &self,
        ids: &[&str],
        filter: Option<&Filter>,
    ) -> Result<DescribeImagesResponse> {
        let mut params = Params::new("DescribeImages");
        params.root().list("ImageId", ids);
        encode_filter(filter, &mut params);
        self.inner.query(params).await
    }

    /// Snapshot a volume.
    pub async fn create_snapshot(
        &self,
        volume_id: &str,
        description: &str,
    ) -> Result<CreateSnapshotResponse> {
        let mut params = Params::new("CreateSnapshot");
        {
            let mut root = params.root();
            root.set("VolumeId", volume_id);
            root.set_non_empty("Description", description);
        }
        self.inner.query(params).await
    }

    /// Delete snapshots.
    pub async fn delete_snapshots(&self, ids: &[&str]) -> Result<SimpleResponse> {
        let mut params = Params::new("DeleteSnapshot");
        params.root().list("SnapshotId", ids);
        self.inner.query(params).await
    }

    /// Describe snapshots, optionally narrowed by id and filter.
    pub async fn describe_snapshots(
        &self,
        ids: &[&str],
        filter: Option<&Filter>,
    ) -> Result<DescribeSnapshotsResponse> {
        let mut params = Params::new("DescribeSnapshots");
        params.root().list("SnapshotId", ids);
        encode_filter(filter, &mut params);
        self.inner.query(params).await
    }

    // -----------------------------------------------------------------------
    // Security groups

    /// Create a security group.
    pub async fn create_security_group(
        &self,
        name: &str,
        description: &str,
    ) -> Result<CreateSecurityGroupResponse> {
        let mut params = Params::new("CreateSecurityGroup");
        {
            let mut root = params.root();
            root.set("GroupName", name);
            root.set("GroupDescription", description);
        }

        let mut resp: CreateSecurityGroupResponse = self.inner.query(params).await?;
        resp.group.name = name.to_string();
        Ok(resp)
    }

    /// Describe security groups, optionally narrowed by reference and filter.
    pub async fn describe_security_groups(
        &self,
        groups: &[SecurityGroup],
        filter: Option<&Filter>,
    ) -> Result<DescribeSecurityGroupsResponse> {
        let mut params = Params::new("DescribeSecurityGroups");
        params.root().id_or_name_list(
            "GroupId",
            "GroupName",
            groups.iter().map(|group| (group.id.as_str(), group.name.as_str())),
        );
        encode_filter(filter, &mut params);
        self.inner.query(params).await
    }

    /// Delete a security group.
    pub async fn delete_security_group(&self, group: &SecurityGroup) -> Result<SimpleResponse> {
        let mut params = Params::new("DeleteSecurityGroup");
        params
            .root()
            .id_or_name("GroupId", "GroupName", &group.id, &group.name);
        self.inner.query(params).await
    }

    /// Open ingress rules on a security group.
    pub async fn authorize_security_group(
        &self,
        group: &SecurityGroup,
        perms: &[IpPermission],
    ) -> Result<SimpleResponse> {
        self.inner
            .query(ingress_params("AuthorizeSecurityGroupIngress", group, perms))
            .await
    }

    /// Remove ingress rules from a security group.
    pub async fn revoke_security_group(
        &self,
        group: &SecurityGroup,
        perms: &[IpPermission],
    ) -> Result<SimpleResponse> {
        self.inner
            .query(ingress_params("RevokeSecurityGroupIngress", group, perms))
            .await
    }

    // -----------------------------------------------------------------------
    // Tags

    /// Add or overwrite tags on resources.
    pub async fn create_tags(&self, resource_ids: &[&str], tags: &[Tag]) -> Result<SimpleResponse> {
        let mut params = Params::new("CreateTags");
        {
            let mut root = params.root();
            root.list("ResourceId", resource_ids);
            root.indexed("Tag", tags);
        }
        self.inner.query(params).await
    }
}

fn instance_params(action: &str, ids: &[&str]) -> Params {
    let mut params = Params::new(action);
    params.root().list("InstanceId", ids);
    params
}

fn ingress_params(action: &str, group: &SecurityGroup, perms: &[IpPermission]) -> Params {
    let mut params = Params::new(action);
    {
        let mut root = params.root();
        root.id_or_name("GroupId", "GroupName", &group.id, &group.name);
        root.indexed("IpPermissions", perms);
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserSecurityGroup;
    use ec2_core::Error;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SIMPLE_OK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Response xmlns="http://ec2.amazonaws.com/doc/2013-02-01/">
  <requestId>59dbff89-35bd-4eac-99ed-be587EXAMPLE</requestId>
  <return>true</return>
</Response>"#;

    fn test_client(server: &MockServer) -> Ec2Client {
        let region = Region::new("test", server.uri()).unwrap();
        Ec2Client::new(Credentials::new("abc", "123"), region).unwrap()
    }

    async fn sent_params(server: &MockServer) -> Vec<Params> {
        server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| Params::from_query_string(request.url.query().unwrap_or_default()))
            .collect()
    }

    fn assert_no_empty_values(params: &Params) {
        for (key, value) in params.iter() {
            assert!(!value.is_empty(), "{key} sent empty");
        }
    }

    #[tokio::test]
    async fn run_instances_sends_options_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("Action", "RunInstances"))
            .and(query_param("ImageId", "ami-a"))
            .and(query_param("MinCount", "1"))
            .and(query_param("MaxCount", "1"))
            .and(query_param("SecurityGroupId.1", "g1"))
            .and(query_param("SecurityGroup.1", "g3"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<RunInstancesResponse><requestId>req</requestId>\
                 <reservationId>r-47a5402e</reservationId><ownerId>999988887777</ownerId>\
                 <instancesSet><item><instanceId>i-2ba64342</instanceId></item></instancesSet>\
                 </RunInstancesResponse>",
            ))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let options = RunInstancesOptions::new("ami-a").with_security_groups(vec![
            SecurityGroup::with_id("g1"),
            SecurityGroup {
                id: "g2".to_string(),
                name: "g2name".to_string(),
            },
            SecurityGroup::with_name("g3"),
        ]);

        let resp = client.run_instances(&options).await.unwrap();
        assert_eq!(resp.reservation_id, "r-47a5402e");
        assert_eq!(resp.instances[0].instance_id, "i-2ba64342");
        client.run_instances(&options).await.unwrap();

        let sent = sent_params(&server).await;
        let first = sent[0].get("ClientToken").unwrap();
        let second = sent[1].get("ClientToken").unwrap();
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);

        assert_eq!(sent[0].get("SecurityGroupId.2"), Some("g2"));
        assert!(!sent[0].contains_key("SecurityGroup.2"));
        assert!(!sent[0].contains_key("KeyName"));
        assert!(!sent[0].contains_key("UserData"));
        assert_no_empty_values(&sent[0]);
    }

    #[tokio::test]
    async fn terminate_instances_decodes_state_changes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Action", "TerminateInstances"))
            .and(query_param("InstanceId.1", "i-1"))
            .and(query_param("InstanceId.2", "i-2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<TerminateInstancesResponse><requestId>req</requestId><instancesSet>\
                 <item><instanceId>i-1</instanceId>\
                 <currentState><code>32</code><name>shutting-down</name></currentState>\
                 <previousState><code>16</code><name>running</name></previousState></item>\
                 </instancesSet></TerminateInstancesResponse>",
            ))
            .mount(&server)
            .await;

        let resp = test_client(&server)
            .terminate_instances(&["i-1", "i-2"])
            .await
            .unwrap();
        let change = &resp.state_changes[0];
        assert_eq!(change.instance_id, "i-1");
        assert_eq!(change.current_state.code, 32);
        assert_eq!(change.previous_state.name, "running");
    }

    #[tokio::test]
    async fn start_stop_and_reboot_use_their_actions() {
        let server = MockServer::start().await;
        for action in ["StartInstances", "StopInstances", "RebootInstances"] {
            Mock::given(method("GET"))
                .and(query_param("Action", action))
                .and(query_param("InstanceId.1", "i-10a64379"))
                .respond_with(ResponseTemplate::new(200).set_body_string(SIMPLE_OK))
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = test_client(&server);
        client.start_instances(&["i-10a64379"]).await.unwrap();
        client.stop_instances(&["i-10a64379"]).await.unwrap();
        let resp = client.reboot_instances(&["i-10a64379"]).await.unwrap();
        assert!(resp.success);
        assert_eq!(resp.request_id, "59dbff89-35bd-4eac-99ed-be587EXAMPLE");
    }

    #[tokio::test]
    async fn describe_instances_copies_reservation_owner() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Action", "DescribeInstances"))
            .and(query_param("InstanceId.1", "i-1"))
            .and(query_param("Filter.1.Name", "instance-state-name"))
            .and(query_param("Filter.1.Value.1", "running"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<DescribeInstancesResponse><requestId>req</requestId><reservationSet>\
                 <item><reservationId>r-1</reservationId><ownerId>111122223333</ownerId>\
                 <instancesSet><item><instanceId>i-1</instanceId></item>\
                 <item><instanceId>i-2</instanceId></item></instancesSet></item>\
                 </reservationSet></DescribeInstancesResponse>",
            ))
            .mount(&server)
            .await;

        let filter = Filter::new().with("instance-state-name", ["running"]);
        let resp = test_client(&server)
            .describe_instances(&["i-1"], Some(&filter))
            .await
            .unwrap();
        let instances = &resp.reservations[0].instances;
        assert_eq!(instances.len(), 2);
        assert!(instances.iter().all(|i| i.owner_id == "111122223333"));
    }

    #[tokio::test]
    async fn describe_without_ids_or_filter_sends_neither() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Action", "DescribeAddresses"))
            .and(query_param_is_missing("InstanceId.1"))
            .and(query_param_is_missing("Filter.1.Name"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<DescribeAddressesResponse><requestId>req</requestId>\
                 <addressesSet/></DescribeAddressesResponse>",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let resp = test_client(&server)
            .describe_addresses(&[], None)
            .await
            .unwrap();
        assert!(resp.addresses.is_empty());
    }

    #[tokio::test]
    async fn create_snapshot_returns_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Action", "CreateSnapshot"))
            .and(query_param("VolumeId", "vol-4d826724"))
            .and(query_param("Description", "Daily Backup"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<CreateSnapshotResponse><requestId>req</requestId>\
                 <snapshotId>snap-78a54011</snapshotId><volumeId>vol-4d826724</volumeId>\
                 <status>pending</status><startTime>2008-05-07T12:51:50.000Z</startTime>\
                 <progress>60%</progress><ownerId>111122223333</ownerId>\
                 <volumeSize>10</volumeSize><description>Daily Backup</description>\
                 </CreateSnapshotResponse>",
            ))
            .mount(&server)
            .await;

        let resp = test_client(&server)
            .create_snapshot("vol-4d826724", "Daily Backup")
            .await
            .unwrap();
        assert_eq!(resp.request_id, "req");
        assert_eq!(resp.snapshot.id, "snap-78a54011");
        assert_eq!(resp.snapshot.volume_size, 10);
        assert_eq!(resp.snapshot.progress, "60%");
    }

    #[tokio::test]
    async fn delete_snapshots_uses_singular_action() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Action", "DeleteSnapshot"))
            .and(query_param("SnapshotId.1", "snap-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SIMPLE_OK))
            .expect(1)
            .mount(&server)
            .await;

        let resp = test_client(&server).delete_snapshots(&["snap-1"]).await.unwrap();
        assert!(resp.success);
    }

    #[tokio::test]
    async fn create_security_group_fills_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Action", "CreateSecurityGroup"))
            .and(query_param("GroupName", "websrv"))
            .and(query_param("GroupDescription", "Web Servers"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<CreateSecurityGroupResponse><requestId>req</requestId>\
                 <return>true</return><groupId>sg-67ad940e</groupId>\
                 </CreateSecurityGroupResponse>",
            ))
            .mount(&server)
            .await;

        let resp = test_client(&server)
            .create_security_group("websrv", "Web Servers")
            .await
            .unwrap();
        assert_eq!(resp.group.id, "sg-67ad940e");
        assert_eq!(resp.group.name, "websrv");
    }

    #[tokio::test]
    async fn delete_security_group_prefers_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Action", "DeleteSecurityGroup"))
            .and(query_param("GroupId", "sg-1"))
            .and(query_param_is_missing("GroupName"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SIMPLE_OK))
            .expect(1)
            .mount(&server)
            .await;

        let group = SecurityGroup {
            id: "sg-1".to_string(),
            name: "web".to_string(),
        };
        test_client(&server).delete_security_group(&group).await.unwrap();
    }

    #[tokio::test]
    async fn describe_security_groups_numbers_ids_and_names_separately() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Action", "DescribeSecurityGroups"))
            .and(query_param("GroupId.1", "sg-1"))
            .and(query_param("GroupName.1", "web"))
            .and(query_param("GroupName.2", "db"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<DescribeSecurityGroupsResponse><requestId>req</requestId>\
                 <securityGroupInfo/></DescribeSecurityGroupsResponse>",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let mut groups = crate::models::security_group_names(["web", "db"]);
        groups.insert(0, SecurityGroup::with_id("sg-1"));
        let resp = test_client(&server)
            .describe_security_groups(&groups, None)
            .await
            .unwrap();
        assert!(resp.groups.is_empty());
    }

    #[tokio::test]
    async fn authorize_and_revoke_encode_permissions() {
        let server = MockServer::start().await;
        for action in ["AuthorizeSecurityGroupIngress", "RevokeSecurityGroupIngress"] {
            Mock::given(method("GET"))
                .and(query_param("Action", action))
                .and(query_param("GroupName", "websrv"))
                .and(query_param("IpPermissions.1.IpProtocol", "tcp"))
                .and(query_param("IpPermissions.1.FromPort", "80"))
                .and(query_param("IpPermissions.1.ToPort", "81"))
                .and(query_param("IpPermissions.1.IpRanges.1.CidrIp", "127.0.0.0/24"))
                .and(query_param("IpPermissions.1.Groups.1.GroupId", "sg-67890"))
                .and(query_param("IpPermissions.1.Groups.2.UserId", "999988887777"))
                .and(query_param("IpPermissions.1.Groups.2.GroupName", "other"))
                .respond_with(ResponseTemplate::new(200).set_body_string(SIMPLE_OK))
                .expect(1)
                .mount(&server)
                .await;
        }

        let perms = vec![IpPermission {
            protocol: "tcp".to_string(),
            from_port: 80,
            to_port: 81,
            source_ips: vec!["127.0.0.0/24".to_string()],
            source_groups: vec![
                UserSecurityGroup {
                    id: "sg-67890".to_string(),
                    ..UserSecurityGroup::default()
                },
                UserSecurityGroup {
                    name: "other".to_string(),
                    owner_id: "999988887777".to_string(),
                    ..UserSecurityGroup::default()
                },
            ],
        }];
        let group = SecurityGroup::with_name("websrv");
        let client = test_client(&server);
        client.authorize_security_group(&group, &perms).await.unwrap();
        client.revoke_security_group(&group, &perms).await.unwrap();
    }

    #[tokio::test]
    async fn create_tags_indexes_tags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Action", "CreateTags"))
            .and(query_param("ResourceId.1", "ami-1a2b3c4d"))
            .and(query_param("ResourceId.2", "i-7f4d3a2b"))
            .and(query_param("Tag.1.Key", "webserver"))
            .and(query_param("Tag.2.Key", "stack"))
            .and(query_param("Tag.2.Value", "Production"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SIMPLE_OK))
            .expect(1)
            .mount(&server)
            .await;

        let tags = [Tag::new("webserver", ""), Tag::new("stack", "Production")];
        test_client(&server)
            .create_tags(&["ami-1a2b3c4d", "i-7f4d3a2b"], &tags)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn provider_error_is_returned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Action", "DescribeImages"))
            .respond_with(ResponseTemplate::new(403).set_body_string(
                "<Response><Errors><Error><Code>AuthFailure</Code>\
                 <Message>Not authorized</Message></Error></Errors>\
                 <RequestID>req-403</RequestID></Response>",
            ))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .describe_images(&["ami-1"], None)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "AuthFailure");
        let api = err.as_api().unwrap();
        assert_eq!(api.status_code, 403);
        assert_eq!(api.message, "Not authorized");
        assert_eq!(api.request_id, "req-403");
    }

    #[tokio::test]
    async fn server_error_without_body_uses_status_line() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .describe_snapshots(&[], None)
            .await
            .unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.code, "");
                assert_eq!(api.message, "500 Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
