//! EC2 compute client and data models.
//!
//! Provides typed models and an asynchronous client for the instance, image,
//! snapshot, security group, address and tagging calls of the EC2 query API.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{Ec2Client, Ec2ClientBuilder};
pub use models::{
    security_group_ids, security_group_names, Address, BlockDeviceMapping,
    CreateSecurityGroupResponse, CreateSnapshotResponse, DescribeAddressesResponse,
    DescribeImagesResponse, DescribeInstancesResponse, DescribeSecurityGroupsResponse,
    DescribeSnapshotsResponse, EbsBlockDevice, Image, Instance, InstanceState,
    InstanceStateChange, IpPermission, Reservation, RunInstancesOptions, RunInstancesResponse,
    SecurityGroup, SecurityGroupInfo, SimpleResponse, Snapshot, Tag, UserSecurityGroup,
};

pub use ec2_core::{Credentials, Error, Filter, Region};

/// Convenient result alias using the shared EC2 error type.
pub type Result<T> = ec2_core::Result<T>;
