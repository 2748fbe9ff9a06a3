use configparser::ini::Ini;
use std::error::Error;
use std::path::Path;

/// Enumerate credential profiles from ~/.aws/config.
///
/// The synthetic "default" profile always comes first, whether or not the
/// config file declares it: default credentials are valid without a profile
/// block. Named profiles follow in sorted order so repeated runs enumerate
/// identically.
pub fn list_profiles() -> Result<Vec<String>, Box<dyn Error>> {
    let config_path = dirs_next::home_dir()
        .map(|home| home.join(".aws/config"))
        .ok_or("Could not locate home directory")?;

    profiles_from_config(&config_path)
}

pub fn profiles_from_config(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let mut profiles = vec!["default".to_string()];

    if !path.exists() {
        return Ok(profiles);
    }

    // Profile names are case-sensitive, so parse the ini case-sensitively.
    let mut config = Ini::new_cs();
    config
        .load(path)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    let mut named: Vec<String> = config
        .sections()
        .into_iter()
        .filter_map(|section| {
            section
                .strip_prefix("profile ")
                .map(|name| name.trim().to_string())
        })
        .filter(|name| !name.is_empty() && name != "default")
        .collect();
    named.sort();
    named.dedup();

    profiles.extend(named);
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn default_comes_first_and_named_profiles_are_sorted() {
        let file = config_file(
            "[default]\nregion = us-east-1\n\n\
             [profile work]\nregion = eu-west-1\n\n\
             [profile dev]\nregion = us-west-2\n",
        );

        let profiles = profiles_from_config(file.path()).unwrap();
        assert_eq!(profiles, vec!["default", "dev", "work"]);
    }

    #[test]
    fn missing_config_file_still_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let profiles = profiles_from_config(&dir.path().join("config")).unwrap();
        assert_eq!(profiles, vec!["default"]);
    }

    #[test]
    fn declared_default_profile_is_not_duplicated() {
        let file = config_file("[default]\nregion = us-east-1\n\n[profile default]\n");
        let profiles = profiles_from_config(file.path()).unwrap();
        assert_eq!(profiles, vec!["default"]);
    }

    #[test]
    fn profile_names_keep_their_case() {
        let file = config_file("[profile Prod-Admin]\nregion = us-east-1\n");
        let profiles = profiles_from_config(file.path()).unwrap();
        assert_eq!(profiles, vec!["default", "Prod-Admin"]);
    }
}
