use std::path::PathBuf;

use clap::ArgMatches;

/// Resolved run settings - CLI arguments with defaults already applied.
pub struct Settings {
    pub evidence: PathBuf,
    pub msms: PathBuf,
    pub out_evidence: PathBuf,
    pub out_msms: PathBuf,
    pub remove: Vec<String>,
}

impl Settings {
    pub fn from_arguments(matches: &ArgMatches) -> Self {
        let path = |name: &str| {
            matches
                .get_one::<String>(name)
                .map(PathBuf::from)
                .expect("argument has a default value")
        };

        let remove: Vec<String> = matches
            .get_many::<String>("remove")
            .map(|markers| markers.cloned().collect())
            .unwrap_or_default();
        if !remove.is_empty() {
            log::trace!("removing modifications: {:?}", remove);
        }

        Settings {
            evidence: path("evidence"),
            msms: path("msms"),
            out_evidence: path("out-evidence"),
            out_msms: path("out-msms"),
            remove,
        }
    }
}
