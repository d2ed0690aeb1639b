//! Batch reconciliation.
//!
//! Merges per-sheet extracts, normalizes bill-of-lading keys, resolves
//! duplicate (container, B/L) pairs with transshipment priority, and prunes
//! rejects that were recovered elsewhere in the batch.

use std::collections::HashSet;

use stowage_extract::fields::TRANSSHIP_MARKER;
use stowage_extract::{ContainerType, RejectRecord, SheetExtract, ShipmentRecord};

use crate::error::PipelineError;
use crate::report::BatchStats;

/// Reconciled batch: canonical records in final order, surviving rejects,
/// and the headline stats.
#[derive(Debug)]
pub struct BatchOutcome {
    pub records: Vec<ShipmentRecord>,
    pub rejects: Vec<RejectRecord>,
    pub stats: BatchStats,
}

/// Reconcile all per-sheet extracts of one batch.
///
/// Fixed step order: concatenate, normalize B/L keys, dedup by
/// (container_no, bill_of_lading) keeping transshipment-tagged voyages over
/// plain ones, cross-check rejects, count. A batch with zero records is the
/// terminal no-data condition; rejects alone do not make a batch.
pub fn reconcile(batches: Vec<SheetExtract>) -> Result<BatchOutcome, PipelineError> {
    let mut records: Vec<ShipmentRecord> = Vec::new();
    let mut rejects: Vec<RejectRecord> = Vec::new();
    for batch in batches {
        records.extend(batch.records);
        rejects.extend(batch.rejects);
    }

    if records.is_empty() {
        return Err(PipelineError::NoData);
    }

    for record in &mut records {
        record.bill_of_lading = normalize_bill(&record.bill_of_lading);
    }
    for reject in &mut rejects {
        reject.bill_of_lading = normalize_bill(&reject.bill_of_lading);
    }

    // Stable sort, so among fully-equal keys the earliest input survives.
    let before = records.len();
    records.sort_by(|a, b| {
        (a.container_no.as_str(), a.bill_of_lading.as_str(), priority(a)).cmp(&(
            b.container_no.as_str(),
            b.bill_of_lading.as_str(),
            priority(b),
        ))
    });
    records.dedup_by(|a, b| {
        a.container_no == b.container_no && a.bill_of_lading == b.bill_of_lading
    });
    let duplicates_dropped = before - records.len();

    // A reject whose B/L was extracted successfully in another file is not a
    // genuine gap.
    let kept: HashSet<&str> = records.iter().map(|r| r.bill_of_lading.as_str()).collect();
    rejects.retain(|r| !kept.contains(r.bill_of_lading.as_str()));

    let stats = BatchStats {
        final_records: records.len(),
        duplicates_dropped,
        rejects_remaining: rejects.len(),
        suspicious: records
            .iter()
            .filter(|r| r.container_type == ContainerType::Suspicious)
            .count(),
    };

    Ok(BatchOutcome { records, rejects, stats })
}

/// Dedup priority: 0 when the voyage carries the transshipment marker,
/// else 1. Lower sorts first and survives.
fn priority(record: &ShipmentRecord) -> u8 {
    if record.voyage.contains(TRANSSHIP_MARKER) {
        0
    } else {
        1
    }
}

/// B/L key normalization: upper-case with all whitespace removed.
pub fn normalize_bill(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_extract::{RejectReason, SheetCounts};

    fn rec(container: &str, bill: &str, voyage: &str) -> ShipmentRecord {
        ShipmentRecord {
            bill_of_lading: bill.to_string(),
            container_no: container.to_string(),
            container_type: ContainerType::FortyHighCube,
            teu: Some(2),
            voyage: voyage.to_string(),
            port_of_load: String::new(),
            port_of_discharge: String::new(),
            booking_no: String::new(),
            source_file: "a.xlsx".to_string(),
            source_sheet: "S1".to_string(),
        }
    }

    fn rej(bill: &str) -> RejectRecord {
        RejectRecord {
            bill_of_lading: bill.to_string(),
            containers: Vec::new(),
            reason: RejectReason::MissingContainer,
            raw_row: String::new(),
            source_file: "a.xlsx".to_string(),
            source_sheet: "S1".to_string(),
        }
    }

    fn batch(records: Vec<ShipmentRecord>, rejects: Vec<RejectRecord>) -> SheetExtract {
        SheetExtract {
            records,
            rejects,
            counts: SheetCounts::default(),
        }
    }

    #[test]
    fn transship_tagged_duplicate_wins_regardless_of_input_order() {
        let tagged = rec("TCLU9999999", "ABC123", "TOKYO=>BUSAN");
        let plain = rec("TCLU9999999", "ABC123", "AURORA 012E");

        for records in [
            vec![tagged.clone(), plain.clone()],
            vec![plain.clone(), tagged.clone()],
        ] {
            let out = reconcile(vec![batch(records, vec![])]).unwrap();
            assert_eq!(out.records.len(), 1);
            assert_eq!(out.records[0].voyage, "TOKYO=>BUSAN");
            assert_eq!(out.stats.duplicates_dropped, 1);
        }
    }

    #[test]
    fn bill_normalization_merges_spaced_variants() {
        let out = reconcile(vec![batch(
            vec![
                rec("MAEU1234567", " MBL 001 ", "X"),
                rec("MAEU1234567", "MBL001", "Y"),
            ],
            vec![],
        )])
        .unwrap();
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].bill_of_lading, "MBL001");
        assert_eq!(out.stats.duplicates_dropped, 1);
    }

    #[test]
    fn equal_keys_and_priority_keep_earliest_input() {
        let mut first = rec("MAEU1234567", "MBL001", "PLAIN");
        first.port_of_load = "TOKYO".to_string();
        let mut second = rec("MAEU1234567", "MBL001", "PLAIN");
        second.port_of_load = "OSAKA".to_string();

        let out = reconcile(vec![batch(vec![first, second], vec![])]).unwrap();
        assert_eq!(out.records[0].port_of_load, "TOKYO");
    }

    #[test]
    fn same_container_under_two_bills_is_not_a_duplicate() {
        let out = reconcile(vec![batch(
            vec![
                rec("MAEU1234567", "MBL001", ""),
                rec("MAEU1234567", "MBL002", ""),
            ],
            vec![],
        )])
        .unwrap();
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.stats.duplicates_dropped, 0);
    }

    #[test]
    fn final_order_is_container_then_bill() {
        let out = reconcile(vec![batch(
            vec![
                rec("TCLU7654321", "MBL002", ""),
                rec("MAEU1234567", "MBL009", ""),
                rec("MAEU1234567", "MBL001", ""),
            ],
            vec![],
        )])
        .unwrap();
        let keys: Vec<(&str, &str)> = out
            .records
            .iter()
            .map(|r| (r.container_no.as_str(), r.bill_of_lading.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("MAEU1234567", "MBL001"),
                ("MAEU1234567", "MBL009"),
                ("TCLU7654321", "MBL002"),
            ]
        );
    }

    #[test]
    fn cross_check_drops_rejects_recovered_elsewhere() {
        let out = reconcile(vec![
            batch(vec![rec("MAEU1234567", "MBL 777", "")], vec![]),
            batch(vec![], vec![rej("MBL777"), rej("MBL888")]),
        ])
        .unwrap();
        assert_eq!(out.rejects.len(), 1);
        assert_eq!(out.rejects[0].bill_of_lading, "MBL888");
        assert_eq!(out.stats.rejects_remaining, 1);
    }

    #[test]
    fn missing_bill_rejects_survive_cross_check() {
        let mut no_bill = rej("");
        no_bill.reason = RejectReason::MissingBill;
        no_bill.containers = vec!["GESU2222222".to_string()];

        let out = reconcile(vec![batch(
            vec![rec("MAEU1234567", "MBL001", "")],
            vec![no_bill],
        )])
        .unwrap();
        assert_eq!(out.rejects.len(), 1);
        assert_eq!(out.rejects[0].reason, RejectReason::MissingBill);
    }

    #[test]
    fn zero_records_is_terminal_no_data() {
        assert!(matches!(
            reconcile(vec![]),
            Err(PipelineError::NoData)
        ));
        // Rejects alone do not make a batch.
        assert!(matches!(
            reconcile(vec![batch(vec![], vec![rej("MBL001")])]),
            Err(PipelineError::NoData)
        ));
    }

    #[test]
    fn suspicious_counted_on_final_set_only() {
        let mut a = rec("MAEU1234567", "MBL001", "X=>Y");
        a.container_type = ContainerType::Suspicious;
        a.teu = None;
        let mut dup = rec("MAEU1234567", "MBL001", "");
        dup.container_type = ContainerType::Suspicious;
        dup.teu = None;
        let plain = rec("TCLU7654321", "MBL002", "");

        let out = reconcile(vec![batch(vec![a, dup, plain], vec![])]).unwrap();
        assert_eq!(out.stats.final_records, 2);
        assert_eq!(out.stats.suspicious, 1);
    }

    #[test]
    fn rerun_on_same_input_is_identical() {
        let build = || {
            vec![batch(
                vec![
                    rec("TCLU7654321", "MBL002", "A=>B"),
                    rec("MAEU1234567", "MBL001", ""),
                    rec("TCLU7654321", "MBL 002", ""),
                ],
                vec![rej("MBL404")],
            )]
        };
        let first = reconcile(build()).unwrap();
        let second = reconcile(build()).unwrap();

        let keys = |out: &BatchOutcome| {
            out.records
                .iter()
                .map(|r| (r.container_no.clone(), r.bill_of_lading.clone(), r.voyage.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(keys(&first), keys(&second));
        assert_eq!(first.stats, second.stats);
    }
}
