use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_types::region::Region;

/// Load an SDK config bound to a named credential profile, optionally
/// pinned to a region. Without a region the default provider chain applies.
pub async fn configure_aws(profile: &str, region: Option<String>) -> aws_types::SdkConfig {
    let region_provider =
        RegionProviderChain::first_try(region.map(Region::new)).or_default_provider();

    aws_config::defaults(BehaviorVersion::v2024_03_28())
        .profile_name(profile)
        .region(region_provider)
        .load()
        .await
}
