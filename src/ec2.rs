use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::{Filter, Instance, Tag};
use aws_sdk_ec2::Client as Ec2Client;
use std::error::Error;

/// Which instances a region query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceSelection {
    /// Only instances holding a public IPv4 address, filtered server-side.
    PublicIpOnly,
    /// Every instance in the region, regardless of addressing.
    All,
}

/// Fields extracted from one EC2 instance. Everything is kept as text;
/// absent public IP or Name tag becomes an empty string, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredInstance {
    pub instance_id: String,
    pub instance_type: String,
    pub state: String,
    pub public_ip: String,
    pub name: String,
}

pub async fn describe_instances(
    client: &Ec2Client,
    selection: InstanceSelection,
) -> Result<Vec<DiscoveredInstance>, Box<dyn Error>> {
    let mut request = client.describe_instances();

    if selection == InstanceSelection::PublicIpOnly {
        // ip-address matches the public IPv4 address; a bare wildcard keeps
        // instances without one out of the response entirely.
        request = request.filters(Filter::builder().name("ip-address").values("*").build());
    }

    let resp = request
        .send()
        .await
        .map_err(|e| format!("describe-instances failed: {}", DisplayErrorContext(&e)))?;

    let instances: Vec<DiscoveredInstance> = resp
        .reservations()
        .iter()
        .flat_map(|res| res.instances())
        .filter_map(extract_instance)
        .collect();

    Ok(instances)
}

fn extract_instance(inst: &Instance) -> Option<DiscoveredInstance> {
    let instance_id = inst.instance_id()?.to_string();

    Some(DiscoveredInstance {
        instance_id,
        instance_type: inst
            .instance_type()
            .map(|t| t.as_str().to_string())
            .unwrap_or_default(),
        state: inst
            .state()
            .and_then(|s| s.name())
            .map(|n| n.as_str().to_string())
            .unwrap_or_default(),
        public_ip: inst.public_ip_address().unwrap_or_default().to_string(),
        name: name_tag(inst.tags()),
    })
}

/// Value of the first tag whose key is exactly "Name"; empty when absent.
pub fn name_tag(tags: &[Tag]) -> String {
    tags.iter()
        .find(|tag| tag.key() == Some("Name"))
        .and_then(|tag| tag.value())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::types::{InstanceState, InstanceStateName, InstanceType};

    fn tag(key: &str, value: &str) -> Tag {
        Tag::builder().key(key).value(value).build()
    }

    #[test]
    fn name_tag_picks_the_name_key_among_others() {
        let tags = vec![tag("Env", "prod"), tag("Name", "web1")];
        assert_eq!(name_tag(&tags), "web1");
    }

    #[test]
    fn missing_name_tag_yields_empty_string() {
        let tags = vec![tag("Env", "prod")];
        assert_eq!(name_tag(&tags), "");
        assert_eq!(name_tag(&[]), "");
    }

    #[test]
    fn name_tag_key_match_is_exact() {
        let tags = vec![tag("name", "lower"), tag("NAME", "upper")];
        assert_eq!(name_tag(&tags), "");
    }

    #[test]
    fn extract_fills_every_field_when_present() {
        let inst = Instance::builder()
            .instance_id("i-0123456789abcdef0")
            .instance_type(InstanceType::T2Micro)
            .state(
                InstanceState::builder()
                    .name(InstanceStateName::Running)
                    .build(),
            )
            .public_ip_address("54.10.20.30")
            .tags(tag("Name", "web1"))
            .build();

        let discovered = extract_instance(&inst).unwrap();
        assert_eq!(discovered.instance_id, "i-0123456789abcdef0");
        assert_eq!(discovered.instance_type, "t2.micro");
        assert_eq!(discovered.state, "running");
        assert_eq!(discovered.public_ip, "54.10.20.30");
        assert_eq!(discovered.name, "web1");
    }

    #[test]
    fn absent_optional_fields_default_to_empty() {
        let inst = Instance::builder().instance_id("i-3").build();

        let discovered = extract_instance(&inst).unwrap();
        assert_eq!(discovered.public_ip, "");
        assert_eq!(discovered.name, "");
        assert_eq!(discovered.instance_type, "");
        assert_eq!(discovered.state, "");
    }

    #[test]
    fn instances_without_an_id_are_skipped() {
        let inst = Instance::builder().public_ip_address("54.10.20.30").build();
        assert!(extract_instance(&inst).is_none());
    }
}
