use serde::{Deserialize, Serialize};

/// Unique identifier for a target company
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub u64);

impl CompanyId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CompanyId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Industry classification of a target company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyClassification {
    pub company_id: CompanyId,
    /// Company belongs to the tracked industry (space economy)
    pub is_industry: bool,
    /// Upstream segment (consumed by reports only)
    #[serde(default)]
    pub is_upstream: bool,
    /// Downstream segment (consumed by reports only)
    #[serde(default)]
    pub is_downstream: bool,
    pub continent: String,
}

impl CompanyClassification {
    pub fn new(company_id: impl Into<CompanyId>, is_industry: bool, continent: impl Into<String>) -> Self {
        Self {
            company_id: company_id.into(),
            is_industry,
            is_upstream: false,
            is_downstream: false,
            continent: continent.into(),
        }
    }

    pub fn with_segments(mut self, is_upstream: bool, is_downstream: bool) -> Self {
        self.is_upstream = is_upstream;
        self.is_downstream = is_downstream;
        self
    }

    /// Region match is trimmed and case-insensitive
    pub fn in_region(&self, region: &str) -> bool {
        self.continent.trim().to_lowercase() == region.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_region_ignores_case_and_whitespace() {
        let company = CompanyClassification::new(1u64, true, " EUROPE ");
        assert!(company.in_region("Europe"));
        assert!(!company.in_region("North America"));
    }

    #[test]
    fn test_segments_default_false() {
        let company = CompanyClassification::new(2u64, true, "Europe");
        assert!(!company.is_upstream);
        assert!(!company.is_downstream);

        let company = company.with_segments(true, false);
        assert!(company.is_upstream);
    }
}
