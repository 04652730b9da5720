pub mod company_profile;
pub mod headline;
