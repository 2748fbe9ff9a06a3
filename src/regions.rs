use aws_sdk_ec2::Client as Ec2Client;
use std::error::Error;

/// List the regions the profile behind this client is authorized to use.
///
/// Region availability varies by account, so the caller is expected to
/// invoke this once per profile rather than once globally.
pub async fn list_regions(client: &Ec2Client) -> Result<Vec<String>, Box<dyn Error>> {
    let resp = client.describe_regions().send().await?;

    let regions: Vec<String> = resp
        .regions()
        .iter()
        .filter_map(|region| region.region_name().map(|name| name.to_string()))
        .collect();

    Ok(regions)
}
