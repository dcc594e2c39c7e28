use crate::domain::Domain;

/// Column layout of one domain's backing table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainConfig {
    /// Table file name, relative to the data directory
    pub file: &'static str,
    /// Columns concatenated into the searchable document
    pub search_cols: &'static [&'static str],
    /// Columns copied into each result, in this order
    pub output_cols: &'static [&'static str],
}

const DEVICE: DomainConfig = DomainConfig {
    file: "modbus-devices.csv",
    search_cols: &["Manufacturer", "Model", "Protocol", "Keywords"],
    output_cols: &[
        "Manufacturer",
        "Model",
        "Protocol",
        "Port",
        "UnitID",
        "Parameter",
        "Register",
        "DataType",
        "Scale",
        "Unit",
        "Notes",
    ],
};

const PROTOCOL: DomainConfig = DomainConfig {
    file: "protocols.csv",
    search_cols: &["Protocol", "Keywords", "UseCase"],
    output_cols: &[
        "Protocol",
        "Keywords",
        "UseCase",
        "DefaultPort",
        "Settings",
        "Example",
    ],
};

const TROUBLESHOOT: DomainConfig = DomainConfig {
    file: "troubleshooting.csv",
    search_cols: &["Issue", "Symptom", "Protocol", "Keywords"],
    output_cols: &[
        "Issue", "Symptom", "Protocol", "Cause", "Solution", "Command",
    ],
};

/// Read-only table of domain configurations
///
/// Built once at startup and shared by reference with the search engine.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: Vec<(Domain, DomainConfig)>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            entries: vec![
                (Domain::Device, DEVICE),
                (Domain::Protocol, PROTOCOL),
                (Domain::Troubleshoot, TROUBLESHOOT),
            ],
        }
    }
}

impl Catalog {
    /// Configuration for `domain`, or the device configuration if it is missing
    pub fn get(&self, domain: Domain) -> &DomainConfig {
        self.lookup(domain)
            .or_else(|| self.lookup(Domain::Device))
            .unwrap_or(&DEVICE)
    }

    fn lookup(&self, domain: Domain) -> Option<&DomainConfig> {
        self.entries
            .iter()
            .find(|(d, _)| *d == domain)
            .map(|(_, config)| config)
    }

    /// Domains in declaration order
    pub fn domains(&self) -> impl Iterator<Item = Domain> + '_ {
        self.entries.iter().map(|(domain, _)| *domain)
    }
}
