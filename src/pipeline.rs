use crate::ec2::InstanceSelection;
use crate::report::{InstanceRecord, Report, ReportVariant};
use crate::{account, aws_config, ec2, profiles, regions};
use aws_sdk_ec2::Client as Ec2Client;
use std::error::Error;
use tracing::{info, warn};

pub struct RunOptions {
    pub variant: ReportVariant,
    /// Query only these regions instead of DescribeRegions per profile.
    pub region_override: Option<Vec<String>>,
}

/// Walk the profile x region cross-product sequentially and accumulate one
/// record per matching instance. A failed query contributes a failure entry
/// and zero records; only profile enumeration aborts the run.
pub async fn run(options: &RunOptions) -> Result<Report, Box<dyn Error>> {
    let profile_names = profiles::list_profiles()?;
    info!(profiles = profile_names.len(), "starting report run");

    let selection = match options.variant {
        ReportVariant::Exposed => InstanceSelection::PublicIpOnly,
        ReportVariant::Inventory => InstanceSelection::All,
    };

    let mut report = Report::new();

    for profile in &profile_names {
        info!(profile = %profile, "processing profile");
        let base_config = aws_config::configure_aws(profile, None).await;

        let account_id = match account::caller_account_id(&base_config).await {
            Ok(id) => id,
            Err(e) => {
                warn!(profile = %profile, error = %e, "could not resolve caller identity");
                report.record_failure(profile, "*", format!("caller identity: {}", e));
                continue;
            }
        };

        let region_names = match &options.region_override {
            Some(names) => names.clone(),
            None => match regions::list_regions(&Ec2Client::new(&base_config)).await {
                Ok(names) => names,
                Err(e) => {
                    warn!(profile = %profile, error = %e, "could not enumerate regions");
                    report.record_failure(profile, "*", format!("describe-regions: {}", e));
                    continue;
                }
            },
        };

        for region in &region_names {
            info!(profile = %profile, region = %region, "querying instances");
            let config = aws_config::configure_aws(profile, Some(region.clone())).await;
            let client = Ec2Client::new(&config);

            match ec2::describe_instances(&client, selection).await {
                Ok(instances) => {
                    for inst in instances {
                        report.push(InstanceRecord {
                            account_id: account_id.clone(),
                            profile: profile.clone(),
                            region: region.clone(),
                            instance_id: inst.instance_id,
                            instance_type: inst.instance_type,
                            state: inst.state,
                            public_ip: inst.public_ip,
                            name: inst.name,
                        });
                    }
                }
                Err(e) => {
                    warn!(profile = %profile, region = %region, error = %e, "query failed");
                    report.record_failure(profile, region, e.to_string());
                }
            }
        }
    }

    Ok(report)
}
