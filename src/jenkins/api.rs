//! Jenkins JSON API payloads
//!
//! Only the fields the trigger pipeline reads are modelled; Jenkins sends
//! many more and serde ignores them.

use serde::Deserialize;

/// `GET {job}/api/json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub next_build_number: Option<u64>,

    #[serde(default)]
    pub builds: Vec<BuildRef>,
}

impl JobSummary {
    /// Find a listed build by number
    pub fn build(&self, number: u64) -> Option<&BuildRef> {
        self.builds.iter().find(|b| b.number == number)
    }
}

/// Entry of a job's build listing
#[derive(Debug, Clone, Deserialize)]
pub struct BuildRef {
    pub number: u64,
    pub url: String,
}

/// `GET {build}/api/json`
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSummary {
    /// Milliseconds; zero until Jenkins reports the build as started
    #[serde(default)]
    pub duration: f64,

    /// `None` while the build is still running
    #[serde(default)]
    pub result: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_summary_ignores_unknown_fields() {
        let json = r#"{
            "_class": "hudson.model.FreeStyleProject",
            "name": "app",
            "nextBuildNumber": 22,
            "builds": [
                {"_class": "hudson.model.FreeStyleBuild", "number": 21, "url": "https://ci/job/app/21/"},
                {"number": 20, "url": "https://ci/job/app/20/"}
            ]
        }"#;

        let summary: JobSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.next_build_number, Some(22));
        assert_eq!(summary.build(21).unwrap().url, "https://ci/job/app/21/");
        assert!(summary.build(22).is_none());
    }

    #[test]
    fn test_job_summary_without_builds() {
        let summary: JobSummary = serde_json::from_str(r#"{"nextBuildNumber": 1}"#).unwrap();
        assert!(summary.builds.is_empty());
    }

    #[test]
    fn test_build_summary_null_result() {
        let running: BuildSummary =
            serde_json::from_str(r#"{"duration": 0, "result": null, "building": true}"#).unwrap();
        assert_eq!(running.duration, 0.0);
        assert!(running.result.is_none());

        let done: BuildSummary =
            serde_json::from_str(r#"{"duration": 1520, "result": "SUCCESS"}"#).unwrap();
        assert_eq!(done.result.as_deref(), Some("SUCCESS"));
    }
}
