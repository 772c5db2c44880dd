use projstats_common::registry::SchemaRegistry;
use projstats_common::types::{EntryPoint, ProcessMetrics, RawMetric, RunHeader, RunRecord};
use std::collections::BTreeMap;

pub const PROCESSES: [&str; 5] = [
    "HIC_MAPPING:BWAMEM2_INDEX",
    "HIC_MAPPING:CRAM_FILTER_ALIGN_BWAMEM2_FIXMATE_SORT",
    "HIC_MAPPING:CRAM_FILTER_MINIMAP2_FILTER5END_FIXMATE_SORT",
    "GENE_ALIGNMENT:NUC_ALIGNMENTS:MINIMAP2_ALIGN",
    "KMER:FASTK_FASTK",
];

pub fn registry() -> SchemaRegistry {
    SchemaRegistry::new(
        "test",
        vec![
            "HIC_MAPPING".to_string(),
            "GENE_ALIGNMENT".to_string(),
            "KMER".to_string(),
        ],
        PROCESSES.iter().map(|p| p.to_string()).collect(),
    )
    .unwrap()
}

pub fn header(name: &str, entry_point: EntryPoint) -> RunHeader {
    RunHeader {
        unique_name: name.to_string(),
        entry_point,
        pipeline_version: "1.1.0".to_string(),
        duration_hours: 2.0,
        clade: "insects".to_string(),
        prefix: format!("{}_prefix", name),
        ticket: "TOLA-1".to_string(),
        fasta_size_mb: 500.0,
        longread_avg_gb: 1.0,
        hic_avg_gb: 1.0,
        longread_total_gb: 10.0,
        hic_total_gb: 20.0,
    }
}

/// A record whose processes report `value` for every metric.
pub fn record(name: &str, entry_point: EntryPoint, processes: &[(&str, f64)]) -> RunRecord {
    record_with(
        header(name, entry_point),
        processes
            .iter()
            .map(|(identifier, value)| {
                (
                    *identifier,
                    std::array::from_fn(|_| RawMetric::Number(*value)),
                )
            })
            .collect(),
    )
}

pub fn record_with(header: RunHeader, processes: Vec<(&str, [RawMetric; 6])>) -> RunRecord {
    let metrics: BTreeMap<String, ProcessMetrics> = processes
        .into_iter()
        .map(|(identifier, values)| (identifier.to_string(), ProcessMetrics::new(values)))
        .collect();
    RunRecord::new(format!("{}.json", header.unique_name), header, metrics)
}
