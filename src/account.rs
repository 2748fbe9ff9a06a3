use aws_sdk_sts::Client as StsClient;
use std::error::Error;

/// Resolve the account ID behind a profile's credentials via STS
/// GetCallerIdentity. Needs no special permissions; failure here means the
/// profile's credentials are unusable.
pub async fn caller_account_id(config: &aws_types::SdkConfig) -> Result<String, Box<dyn Error>> {
    let sts = StsClient::new(config);
    let identity = sts.get_caller_identity().send().await?;

    let account = identity
        .account()
        .ok_or("No account ID returned from GetCallerIdentity")?;

    Ok(account.to_string())
}
