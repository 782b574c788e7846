//! EC2 compute models.
//!
//! Response types mirror the XML documents EC2 returns; every field defaults
//! when the element is absent. Request inputs implement [`EncodeParams`] and
//! spread themselves over the indexed query keys EC2 expects.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ec2_core::query::{EncodeParams, ParamScope};
use serde::{Deserialize, Deserializer};

/// `<fooSet><item>..</item>..</fooSet>` wrapper used throughout the EC2 schema.
#[derive(Deserialize)]
struct ItemSet<T> {
    #[serde(rename = "item", default = "Vec::new")]
    items: Vec<T>,
}

fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    ItemSet::deserialize(deserializer).map(|set| set.items)
}

#[derive(Deserialize)]
struct IpRange {
    #[serde(rename = "cidrIp", default)]
    cidr_ip: String,
}

fn cidr_ips<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let ranges: Vec<IpRange> = items(deserializer)?;
    Ok(ranges.into_iter().map(|range| range.cidr_ip).collect())
}

// ---------------------------------------------------------------------------
// Shared resources

/// Key/value metadata attached to a resource.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Tag {
    /// Tag key
    pub key: String,
    /// Tag value, possibly empty
    pub value: String,
}

impl Tag {
    /// Create a tag.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl EncodeParams for Tag {
    fn encode_params(&self, scope: &mut ParamScope<'_>) {
        scope.set("Key", &self.key);
        scope.set("Value", &self.value);
    }
}

/// Reference to a security group by id or by name.
///
/// When both are set the id wins on the wire.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SecurityGroup {
    /// Group id (`sg-...`)
    #[serde(rename = "groupId")]
    pub id: String,
    /// Group name
    #[serde(rename = "groupName")]
    pub name: String,
}

impl SecurityGroup {
    /// Reference a group by id.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }

    /// Reference a group by name.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
        }
    }
}

/// Build id references for each of `ids`.
pub fn security_group_ids<I, S>(ids: I) -> Vec<SecurityGroup>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter().map(SecurityGroup::with_id).collect()
}

/// Build name references for each of `names`.
pub fn security_group_names<I, S>(names: I) -> Vec<SecurityGroup>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(SecurityGroup::with_name).collect()
}

/// Product code attached to an image or instance.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductCode {
    /// The product code
    pub product_code: String,
    /// `devpay` or `marketplace`
    #[serde(rename = "type")]
    pub kind: String,
}

// ---------------------------------------------------------------------------
// Instances

/// Instance state as reported by EC2.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InstanceState {
    /// Numeric state code. Bits above the low byte are unpublished.
    pub code: i32,
    /// State name (`pending`, `running`, ...)
    pub name: String,
}

/// State transition of one instance.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstanceStateChange {
    /// Instance id
    pub instance_id: String,
    /// State after the call
    pub current_state: InstanceState,
    /// State before the call
    pub previous_state: InstanceState,
}

/// Reason for the most recent state transition.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InstanceStateReason {
    /// Reason code
    pub code: String,
    /// Reason message
    pub message: String,
}

/// Where an instance runs.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Placement {
    /// Availability zone
    pub availability_zone: String,
    /// Placement group, for cluster instances
    pub group_name: String,
    /// `default` or `dedicated` (VPC only)
    pub tenancy: String,
}

/// Monitoring state of an instance.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Monitoring {
    /// `disabled`, `enabled` or `pending`
    pub state: String,
}

/// IAM instance profile associated with an instance.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IamInstanceProfile {
    /// Profile ARN
    pub arn: String,
    /// Profile id
    pub id: String,
}

/// EBS volume attached to a running instance.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EbsInstanceBlockDevice {
    /// Volume id
    pub volume_id: String,
    /// Attachment status
    pub status: String,
    /// When the volume was attached
    pub attach_time: String,
    /// Whether the volume goes away with the instance
    pub delete_on_termination: bool,
}

/// Block device attached to a running instance.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockDevice {
    /// Device name (`/dev/sda1`)
    pub device_name: String,
    /// Backing EBS volume
    pub ebs: EbsInstanceBlockDevice,
}

/// Attachment of a network interface to an instance.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstanceNetworkInterfaceAttachment {
    /// Attachment id
    pub attachment_id: String,
    /// Device index on the instance
    pub device_index: i32,
    /// `attaching`, `attached`, `detaching` or `detached`
    pub status: String,
    /// When the interface was attached
    pub attach_time: String,
    /// Whether the interface goes away with the instance
    pub delete_on_termination: bool,
}

/// Elastic IP association of a network interface or address.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstanceNetworkInterfaceAssociation {
    /// Public address
    pub public_ip: String,
    /// Public DNS name
    pub public_dns_name: String,
    /// Owner of the Elastic IP
    pub ip_owner_id: String,
}

/// Private address of a network interface.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstancePrivateIpAddress {
    /// Private address
    pub private_ip_address: String,
    /// Private DNS name
    pub private_dns_name: String,
    /// Whether this is the interface's primary address
    pub primary: bool,
    /// Elastic IP association, if any
    pub association: InstanceNetworkInterfaceAssociation,
}

/// Network interface attached to an instance.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstanceNetworkInterface {
    /// Interface id
    #[serde(rename = "networkInterfaceId")]
    pub id: String,
    /// Description
    pub description: String,
    /// Subnet id
    pub subnet_id: String,
    /// VPC id
    pub vpc_id: String,
    /// Account that created the interface
    pub owner_id: String,
    /// `available`, `attaching`, `in-use` or `detaching`
    pub status: String,
    /// MAC address
    pub mac_address: String,
    /// Primary private address
    pub private_ip_address: String,
    /// Private DNS name
    pub private_dns_name: String,
    /// Whether source/destination checking is on
    pub source_dest_check: bool,
    /// Security groups of the interface
    #[serde(rename = "groupSet", deserialize_with = "items")]
    pub security_groups: Vec<SecurityGroup>,
    /// Attachment details
    pub attachment: InstanceNetworkInterfaceAttachment,
    /// Elastic IP association
    pub association: InstanceNetworkInterfaceAssociation,
    /// All private addresses
    #[serde(rename = "privateIpAddressesSet", deserialize_with = "items")]
    pub private_ip_addresses: Vec<InstancePrivateIpAddress>,
}

/// A running or stopped instance.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Instance {
    /// Instance id
    pub instance_id: String,
    /// Instance type (`m1.small`, ...)
    pub instance_type: String,
    /// Placement details
    pub placement: Placement,
    /// Tags on the instance
    #[serde(rename = "tagSet", deserialize_with = "items")]
    pub tags: Vec<Tag>,
    /// Current state
    #[serde(rename = "instanceState")]
    pub state: InstanceState,
    /// Free-form reason for the last transition, possibly empty
    pub reason: String,
    /// Structured reason for the last transition
    pub state_reason: InstanceStateReason,
    /// AMI the instance was launched from
    pub image_id: String,
    /// Key pair name
    pub key_name: String,
    /// Monitoring state
    pub monitoring: Monitoring,
    /// IAM instance profile
    pub iam_instance_profile: IamInstanceProfile,
    /// Launch time as sent by EC2
    pub launch_time: String,
    /// Owning account, copied from the enclosing reservation
    pub owner_id: String,
    /// `i386` or `x86_64`
    pub architecture: String,
    /// `ovm` or `xen`
    pub hypervisor: String,
    /// Kernel id
    pub kernel_id: String,
    /// RAM disk id
    pub ramdisk_id: String,
    /// `windows` for Windows AMIs, otherwise empty
    pub platform: String,
    /// `paravirtual` or `hvm`
    pub virtualization_type: String,
    /// Position within the launch group
    pub ami_launch_index: i32,
    /// `spot` or empty
    pub instance_lifecycle: String,
    /// Spot request id
    pub spot_instance_request_id: String,
    /// Idempotency token given at launch
    pub client_token: String,
    /// Product codes
    #[serde(rename = "productCodes", deserialize_with = "items")]
    pub product_codes: Vec<ProductCode>,
    /// `ebs` or `instance-store`
    pub root_device_type: String,
    /// Root device name
    pub root_device_name: String,
    /// Attached block devices
    #[serde(rename = "blockDeviceMapping", deserialize_with = "items")]
    pub block_devices: Vec<BlockDevice>,
    /// Whether the instance is EBS-optimized
    pub ebs_optimized: bool,
    /// Public DNS name
    pub dns_name: String,
    /// Private DNS name
    pub private_dns_name: String,
    /// Public address
    pub ip_address: String,
    /// Private address
    pub private_ip_address: String,
    /// Subnet id (VPC only)
    pub subnet_id: String,
    /// VPC id
    pub vpc_id: String,
    /// Security groups
    #[serde(rename = "groupSet", deserialize_with = "items")]
    pub security_groups: Vec<SecurityGroup>,
    /// Network interfaces (VPC only)
    #[serde(rename = "networkInterfaceSet", deserialize_with = "items")]
    pub network_interfaces: Vec<InstanceNetworkInterface>,
    /// Whether source/destination checking is on
    pub source_dest_check: bool,
    /// Enhanced networking support
    pub sriov_net_support: String,
}

impl Instance {
    /// Returns true for spot instances.
    #[must_use]
    pub fn is_spot_instance(&self) -> bool {
        self.instance_lifecycle == "spot"
    }
}

/// A group of instances launched by one request.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Reservation {
    /// Reservation id
    pub reservation_id: String,
    /// Owning account
    pub owner_id: String,
    /// Account that launched on the owner's behalf
    pub requester_id: String,
    /// Security groups
    #[serde(rename = "groupSet", deserialize_with = "items")]
    pub security_groups: Vec<SecurityGroup>,
    /// Instances in the reservation
    #[serde(rename = "instancesSet", deserialize_with = "items")]
    pub instances: Vec<Instance>,
}

/// EBS settings of a block device mapping.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EbsBlockDevice {
    /// Snapshot to create the volume from
    pub snapshot_id: String,
    /// `standard` or `io1`
    pub volume_type: String,
    /// Size in GiB; zero leaves it to the snapshot
    pub volume_size: i64,
    /// Whether the volume goes away with the instance
    pub delete_on_termination: bool,
    /// Provisioned IOPS for `io1` volumes
    pub iops: i64,
}

impl EncodeParams for EbsBlockDevice {
    fn encode_params(&self, scope: &mut ParamScope<'_>) {
        scope.set_non_empty("SnapshotId", &self.snapshot_id);
        scope.set_non_empty("VolumeType", &self.volume_type);
        scope.set_non_zero("VolumeSize", self.volume_size);
        scope.set_flag("DeleteOnTermination", self.delete_on_termination);
        scope.set_non_zero("Iops", self.iops);
    }
}

/// Block device mapping of an image or a launch request.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockDeviceMapping {
    /// Device name (`/dev/sdh`)
    pub device_name: String,
    /// Ephemeral store name (`ephemeral0`)
    pub virtual_name: String,
    /// EBS settings
    pub ebs: EbsBlockDevice,
}

impl EncodeParams for BlockDeviceMapping {
    fn encode_params(&self, scope: &mut ParamScope<'_>) {
        scope.set_non_empty("DeviceName", &self.device_name);
        scope.set_non_empty("VirtualName", &self.virtual_name);
        self.ebs.encode_params(&mut scope.nested("Ebs"));
    }
}

/// Options for [`run_instances`](crate::Ec2Client::run_instances).
///
/// Only `image_id` is required. With both counts zero a single instance is
/// launched; with only `max_count` zero it follows `min_count`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunInstancesOptions {
    /// AMI to launch
    pub image_id: String,
    /// Minimum number of instances
    pub min_count: u32,
    /// Maximum number of instances
    pub max_count: u32,
    /// Key pair name
    pub key_name: Option<String>,
    /// Instance type
    pub instance_type: Option<String>,
    /// Security groups, by id or name
    pub security_groups: Vec<SecurityGroup>,
    /// Kernel id
    pub kernel_id: Option<String>,
    /// RAM disk id
    pub ramdisk_id: Option<String>,
    /// Raw user data; base64 encoded on the wire
    pub user_data: Option<Vec<u8>>,
    /// Availability zone
    pub availability_zone: Option<String>,
    /// Placement group
    pub placement_group_name: Option<String>,
    /// Enable detailed monitoring
    pub monitoring: bool,
    /// Subnet to launch into (VPC)
    pub subnet_id: Option<String>,
    /// Protect the instances from API termination
    pub disable_api_termination: bool,
    /// `stop` or `terminate`
    pub shutdown_behavior: Option<String>,
    /// Primary private address (VPC)
    pub private_ip_address: Option<String>,
    /// IAM instance profile ARN
    pub iam_instance_profile_arn: Option<String>,
    /// IAM instance profile name
    pub iam_instance_profile_name: Option<String>,
    /// Block device mappings
    pub block_device_mappings: Vec<BlockDeviceMapping>,
}

impl RunInstancesOptions {
    /// Options launching one instance of `image_id`.
    #[must_use]
    pub fn new(image_id: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            ..Self::default()
        }
    }

    /// Set the instance type.
    #[must_use]
    pub fn with_instance_type(mut self, instance_type: impl Into<String>) -> Self {
        self.instance_type = Some(instance_type.into());
        self
    }

    /// Set the instance counts.
    #[must_use]
    pub fn with_count(mut self, min: u32, max: u32) -> Self {
        self.min_count = min;
        self.max_count = max;
        self
    }

    /// Set the key pair.
    #[must_use]
    pub fn with_key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = Some(key_name.into());
        self
    }

    /// Set the security groups.
    #[must_use]
    pub fn with_security_groups(mut self, groups: Vec<SecurityGroup>) -> Self {
        self.security_groups = groups;
        self
    }

    /// Set the user data.
    #[must_use]
    pub fn with_user_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.user_data = Some(data.into());
        self
    }

    /// Append a block device mapping.
    #[must_use]
    pub fn with_block_device_mapping(mut self, mapping: BlockDeviceMapping) -> Self {
        self.block_device_mappings.push(mapping);
        self
    }

    /// Effective `(MinCount, MaxCount)`.
    #[must_use]
    pub const fn counts(&self) -> (u32, u32) {
        match (self.min_count, self.max_count) {
            (0, 0) => (1, 1),
            (min, 0) => (min, min),
            (min, max) => (min, max),
        }
    }
}

impl EncodeParams for RunInstancesOptions {
    fn encode_params(&self, scope: &mut ParamScope<'_>) {
        let (min, max) = self.counts();
        scope.set("ImageId", &self.image_id);
        scope.set_opt("InstanceType", self.instance_type.as_deref());
        scope.set("MinCount", min);
        scope.set("MaxCount", max);
        scope.id_or_name_list(
            "SecurityGroupId",
            "SecurityGroup",
            self.security_groups
                .iter()
                .map(|group| (group.id.as_str(), group.name.as_str())),
        );
        scope.indexed("BlockDeviceMapping", &self.block_device_mappings);

        scope.set_opt("KeyName", self.key_name.as_deref());
        scope.set_opt("KernelId", self.kernel_id.as_deref());
        scope.set_opt("RamdiskId", self.ramdisk_id.as_deref());
        scope.set_opt(
            "UserData",
            self.user_data.as_deref().map(|data| BASE64.encode(data)),
        );
        scope.set_opt("Placement.AvailabilityZone", self.availability_zone.as_deref());
        scope.set_opt("Placement.GroupName", self.placement_group_name.as_deref());
        scope.set_flag("Monitoring.Enabled", self.monitoring);
        scope.set_opt("SubnetId", self.subnet_id.as_deref());
        scope.set_flag("DisableApiTermination", self.disable_api_termination);
        scope.set_opt(
            "InstanceInitiatedShutdownBehavior",
            self.shutdown_behavior.as_deref(),
        );
        scope.set_opt("PrivateIpAddress", self.private_ip_address.as_deref());
        scope.set_opt("IamInstanceProfile.Arn", self.iam_instance_profile_arn.as_deref());
        scope.set_opt("IamInstanceProfile.Name", self.iam_instance_profile_name.as_deref());
    }
}

/// Response to `RunInstances`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunInstancesResponse {
    /// Request id
    pub request_id: String,
    /// Reservation id
    pub reservation_id: String,
    /// Owning account
    pub owner_id: String,
    /// Security groups
    #[serde(rename = "groupSet", deserialize_with = "items")]
    pub security_groups: Vec<SecurityGroup>,
    /// Launched instances
    #[serde(rename = "instancesSet", deserialize_with = "items")]
    pub instances: Vec<Instance>,
}

/// Response to the terminate, start and stop calls.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstanceStateChangeResponse {
    /// Request id
    pub request_id: String,
    /// One entry per instance
    #[serde(rename = "instancesSet", deserialize_with = "items")]
    pub state_changes: Vec<InstanceStateChange>,
}

/// Response to `TerminateInstances`.
pub type TerminateInstancesResponse = InstanceStateChangeResponse;
/// Response to `StartInstances`.
pub type StartInstancesResponse = InstanceStateChangeResponse;
/// Response to `StopInstances`.
pub type StopInstancesResponse = InstanceStateChangeResponse;

/// Response to `DescribeInstances`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeInstancesResponse {
    /// Request id
    pub request_id: String,
    /// Matching reservations
    #[serde(rename = "reservationSet", deserialize_with = "items")]
    pub reservations: Vec<Reservation>,
}

// ---------------------------------------------------------------------------
// Addresses

/// An Elastic IP address.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    /// Public address
    pub public_ip: String,
    /// `standard` or `vpc`
    pub domain: String,
    /// Instance the address is associated with
    pub instance_id: String,
    /// Allocation id (VPC)
    pub allocation_id: String,
    /// Association id (VPC)
    pub association_id: String,
}

/// Response to `DescribeAddresses`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeAddressesResponse {
    /// Request id
    pub request_id: String,
    /// Matching addresses
    #[serde(rename = "addressesSet", deserialize_with = "items")]
    pub addresses: Vec<Address>,
}

// ---------------------------------------------------------------------------
// Images

/// A machine image.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Image {
    /// Image id
    #[serde(rename = "imageId")]
    pub id: String,
    /// Name
    pub name: String,
    /// Description
    pub description: String,
    /// `machine`, `kernel` or `ramdisk`
    #[serde(rename = "imageType")]
    pub image_type: String,
    /// `available`, `pending` or `failed`
    #[serde(rename = "imageState")]
    pub state: String,
    /// Manifest location
    #[serde(rename = "imageLocation")]
    pub location: String,
    /// Whether launch permissions are public
    #[serde(rename = "isPublic")]
    pub public: bool,
    /// `i386` or `x86_64`
    pub architecture: String,
    /// `windows` or empty
    pub platform: String,
    /// Product codes
    #[serde(rename = "productCodes", deserialize_with = "items")]
    pub product_codes: Vec<ProductCode>,
    /// Kernel id
    pub kernel_id: String,
    /// RAM disk id
    pub ramdisk_id: String,
    /// Reason for a failed state
    pub state_reason: InstanceStateReason,
    /// Owning account
    #[serde(rename = "imageOwnerId")]
    pub owner_id: String,
    /// Owner alias (`amazon`, ...)
    #[serde(rename = "imageOwnerAlias")]
    pub owner_alias: String,
    /// `ebs` or `instance-store`
    pub root_device_type: String,
    /// Root device name
    pub root_device_name: String,
    /// `paravirtual` or `hvm`
    pub virtualization_type: String,
    /// `ovm` or `xen`
    pub hypervisor: String,
    /// Block device mappings
    #[serde(rename = "blockDeviceMapping", deserialize_with = "items")]
    pub block_devices: Vec<BlockDeviceMapping>,
    /// Tags on the image
    #[serde(rename = "tagSet", deserialize_with = "items")]
    pub tags: Vec<Tag>,
}

/// Response to `DescribeImages`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeImagesResponse {
    /// Request id
    pub request_id: String,
    /// Matching images
    #[serde(rename = "imagesSet", deserialize_with = "items")]
    pub images: Vec<Image>,
}

// ---------------------------------------------------------------------------
// Snapshots

/// A volume snapshot.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    /// Snapshot id
    #[serde(rename = "snapshotId")]
    pub id: String,
    /// Source volume
    pub volume_id: String,
    /// Volume size in GiB
    pub volume_size: i64,
    /// `pending`, `completed` or `error`
    pub status: String,
    /// Start time as sent by EC2
    pub start_time: String,
    /// Description
    pub description: String,
    /// Progress, e.g. `80%`
    pub progress: String,
    /// Owning account
    pub owner_id: String,
    /// Owner alias
    pub owner_alias: String,
    /// Tags on the snapshot
    #[serde(rename = "tagSet", deserialize_with = "items")]
    pub tags: Vec<Tag>,
}

/// Response to `CreateSnapshot`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "CreateSnapshotXml")]
pub struct CreateSnapshotResponse {
    /// Request id
    pub request_id: String,
    /// The new snapshot
    pub snapshot: Snapshot,
}

// The snapshot fields sit directly under the response element.
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CreateSnapshotXml {
    request_id: String,
    snapshot_id: String,
    volume_id: String,
    volume_size: i64,
    status: String,
    start_time: String,
    progress: String,
    owner_id: String,
    description: String,
}

impl From<CreateSnapshotXml> for CreateSnapshotResponse {
    fn from(xml: CreateSnapshotXml) -> Self {
        Self {
            request_id: xml.request_id,
            snapshot: Snapshot {
                id: xml.snapshot_id,
                volume_id: xml.volume_id,
                volume_size: xml.volume_size,
                status: xml.status,
                start_time: xml.start_time,
                description: xml.description,
                progress: xml.progress,
                owner_id: xml.owner_id,
                ..Snapshot::default()
            },
        }
    }
}

/// Response to `DescribeSnapshots`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeSnapshotsResponse {
    /// Request id
    pub request_id: String,
    /// Matching snapshots
    #[serde(rename = "snapshotSet", deserialize_with = "items")]
    pub snapshots: Vec<Snapshot>,
}

// ---------------------------------------------------------------------------
// Security groups

/// A group allowed as a traffic source in an [`IpPermission`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserSecurityGroup {
    /// Group id
    #[serde(rename = "groupId")]
    pub id: String,
    /// Group name
    #[serde(rename = "groupName")]
    pub name: String,
    /// Account owning the group, when it is not the caller's
    #[serde(rename = "userId")]
    pub owner_id: String,
}

impl EncodeParams for UserSecurityGroup {
    fn encode_params(&self, scope: &mut ParamScope<'_>) {
        scope.set_non_empty("UserId", &self.owner_id);
        scope.id_or_name("GroupId", "GroupName", &self.id, &self.name);
    }
}

/// An ingress rule: protocol and port range, opened to addresses or groups.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IpPermission {
    /// `tcp`, `udp`, `icmp` or a protocol number
    #[serde(rename = "ipProtocol")]
    pub protocol: String,
    /// Start of the port range (ICMP type for `icmp`)
    #[serde(rename = "fromPort")]
    pub from_port: i32,
    /// End of the port range (ICMP code for `icmp`)
    #[serde(rename = "toPort")]
    pub to_port: i32,
    /// Source CIDR blocks
    #[serde(rename = "ipRanges", deserialize_with = "cidr_ips")]
    pub source_ips: Vec<String>,
    /// Source groups
    #[serde(rename = "groups", deserialize_with = "items")]
    pub source_groups: Vec<UserSecurityGroup>,
}

impl EncodeParams for IpPermission {
    fn encode_params(&self, scope: &mut ParamScope<'_>) {
        scope.set("IpProtocol", &self.protocol);
        scope.set("FromPort", self.from_port);
        scope.set("ToPort", self.to_port);
        for (i, cidr) in self.source_ips.iter().enumerate() {
            scope.set(&format!("IpRanges.{}.CidrIp", i + 1), cidr);
        }
        scope.indexed("Groups", &self.source_groups);
    }
}

/// A security group with its rules.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityGroupInfo {
    /// Group id
    pub group_id: String,
    /// Group name
    pub group_name: String,
    /// Owning account
    pub owner_id: String,
    /// Description
    #[serde(rename = "groupDescription")]
    pub description: String,
    /// VPC id, for VPC groups
    pub vpc_id: String,
    /// Ingress rules
    #[serde(rename = "ipPermissions", deserialize_with = "items")]
    pub ip_permissions: Vec<IpPermission>,
    /// Egress rules (VPC only)
    #[serde(rename = "ipPermissionsEgress", deserialize_with = "items")]
    pub ip_permissions_egress: Vec<IpPermission>,
}

impl SecurityGroupInfo {
    /// Reference to this group.
    #[must_use]
    pub fn group(&self) -> SecurityGroup {
        SecurityGroup {
            id: self.group_id.clone(),
            name: self.group_name.clone(),
        }
    }
}

/// Response to `CreateSecurityGroup`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "CreateSecurityGroupXml")]
pub struct CreateSecurityGroupResponse {
    /// Request id
    pub request_id: String,
    /// The new group; its name comes from the request
    pub group: SecurityGroup,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CreateSecurityGroupXml {
    request_id: String,
    group_id: String,
}

impl From<CreateSecurityGroupXml> for CreateSecurityGroupResponse {
    fn from(xml: CreateSecurityGroupXml) -> Self {
        Self {
            request_id: xml.request_id,
            group: SecurityGroup::with_id(xml.group_id),
        }
    }
}

/// Response to `DescribeSecurityGroups`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DescribeSecurityGroupsResponse {
    /// Request id
    pub request_id: String,
    /// Matching groups
    #[serde(rename = "securityGroupInfo", deserialize_with = "items")]
    pub groups: Vec<SecurityGroupInfo>,
}

// ---------------------------------------------------------------------------

/// Response carrying nothing but the request id and the `return` flag.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimpleResponse {
    /// Request id
    pub request_id: String,
    /// Whether EC2 reported success
    #[serde(rename = "return")]
    pub success: bool,
}
