/// One normalized output row describing a single discovered instance.
///
/// Every field is an explicit string, including the ones that look numeric:
/// the writers must never reinterpret account IDs or addresses as numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRecord {
    pub account_id: String,
    pub profile: String,
    pub region: String,
    pub instance_id: String,
    pub instance_type: String,
    pub state: String,
    pub public_ip: String,
    pub name: String,
}

/// A (profile, region) query that returned an error instead of data.
/// Region is "*" when the failure happened before any region was queried
/// (caller identity or region enumeration).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    pub profile: String,
    pub region: String,
    pub reason: String,
}

/// The two report shapes the tool produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportVariant {
    /// Public-IP-bearing instances only.
    Exposed,
    /// Every instance, with type and state instead of addressing.
    Inventory,
}

impl ReportVariant {
    pub fn header(&self) -> &'static [&'static str] {
        match self {
            ReportVariant::Exposed => &[
                "Account ID",
                "Profile",
                "Region",
                "Instance ID",
                "Public IP",
                "Instance Name",
            ],
            ReportVariant::Inventory => &[
                "Profile",
                "Region",
                "Instance ID",
                "Instance Type",
                "State",
                "Name",
            ],
        }
    }

    /// Index of the Profile column within this variant's rows.
    pub fn profile_column(&self) -> usize {
        match self {
            ReportVariant::Exposed => 1,
            ReportVariant::Inventory => 0,
        }
    }

    /// Project a record onto this variant's column order.
    pub fn project(&self, record: &InstanceRecord) -> Vec<String> {
        match self {
            ReportVariant::Exposed => vec![
                record.account_id.clone(),
                record.profile.clone(),
                record.region.clone(),
                record.instance_id.clone(),
                record.public_ip.clone(),
                record.name.clone(),
            ],
            ReportVariant::Inventory => vec![
                record.profile.clone(),
                record.region.clone(),
                record.instance_id.clone(),
                record.instance_type.clone(),
                record.state.clone(),
                record.name.clone(),
            ],
        }
    }
}

/// Full ordered record set for one run, plus the queries that failed.
/// Row order follows enumeration order: profiles, then regions within a
/// profile, then instances within a region.
#[derive(Debug, Default)]
pub struct Report {
    pub records: Vec<InstanceRecord>,
    pub failures: Vec<QueryFailure>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: InstanceRecord) {
        debug_assert!(!record.profile.is_empty());
        debug_assert!(!record.region.is_empty());
        debug_assert!(!record.instance_id.is_empty());
        self.records.push(record);
    }

    pub fn record_failure(&mut self, profile: &str, region: &str, reason: String) {
        self.failures.push(QueryFailure {
            profile: profile.to_string(),
            region: region.to_string(),
            reason,
        });
    }

    pub fn rows(&self, variant: ReportVariant) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|record| variant.project(record))
            .collect()
    }

    /// Distinct profiles that contributed at least one record, in first-seen
    /// order.
    pub fn profiles(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.profile) {
                seen.push(record.profile.clone());
            }
        }
        seen
    }

    /// Instance count per instance type, in first-seen order.
    pub fn instance_type_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for record in &self.records {
            match counts
                .iter_mut()
                .find(|(instance_type, _)| *instance_type == record.instance_type)
            {
                Some((_, count)) => *count += 1,
                None => counts.push((record.instance_type.clone(), 1)),
            }
        }
        counts
    }
}
