/// Header columns of the normalized table, in output order.
pub const HEADER_COLUMNS: [&str; 12] = [
    "Unique_name",
    "Entry_Point",
    "Pipeline_Version",
    "Duration_(Hrs)",
    "Clade",
    "Prefix",
    "Fasta_(mb)",
    "Ticket",
    "Longread_(AVG_GB)",
    "HiC_(AVG_GB)",
    "Longread_(TOTAL_GB)",
    "HiC_(TOTAL_GB)",
];

pub const UNIQUE_NAME_COLUMN: &str = "Unique_name";

/// Number of metrics reported per process in an execution log.
pub const METRICS_PER_PROCESS: usize = 6;

/// Literal used by the summary files for a metric that was not recorded.
pub const MISSING_VALUE_MARKER: &str = "NA";

/// Leaf segments starting with this prefix belong to the alignment/filter super module.
pub const SUPER_MODULE_PREFIX: &str = "CRAM";
pub const SUPER_MODULE_LABEL: &str = "CRAM_SUPER_MODULE";

/// Subworkflows that nest other subworkflows (or only report versions) and
/// therefore never get distribution or peak reports.
pub const EXCLUDED_SUBWORKFLOWS: [&str; 2] = ["GENE_ALIGNMENT", "CUSTOM_DUMPSOFTWAREVERSIONS"];

pub const DEFAULT_REGISTRY_YAML: &str = include_str!("registry/treeval.registry.yml");
