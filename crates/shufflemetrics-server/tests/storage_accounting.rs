//! Write-outcome and byte-count accounting against a live registry.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use shufflemetrics_core::{MetricsError, Scope, ServerTag, StorageHost, HOST_LABEL_ALL};
use shufflemetrics_server::catalog::*;
use shufflemetrics_server::MetricsRegistry;

const TAG: &str = "GRPC,ss_v5";

fn registry() -> MetricsRegistry {
    let r = MetricsRegistry::new();
    r.init(ServerTag::new(TAG)).unwrap();
    r
}

#[test]
fn local_storage_counters() {
    let r = registry();
    let acc = r.storage_accounting().unwrap();
    let m = r.server();

    acc.inc_storage_retry_counter(&StorageHost::Local).unwrap();
    assert_eq!(m.storage_total_write_local.get(&[]).unwrap(), 1);
    assert_eq!(m.storage_retry_write_local.get(&[]).unwrap(), 1);

    acc.inc_storage_success_counter(&StorageHost::Local).unwrap();
    assert_eq!(m.storage_total_write_local.get(&[]).unwrap(), 2);
    assert_eq!(m.storage_success_write_local.get(&[]).unwrap(), 1);

    acc.inc_storage_failed_counter(&StorageHost::Local).unwrap();
    assert_eq!(m.storage_total_write_local.get(&[]).unwrap(), 3);
    assert_eq!(m.storage_failed_write_local.get(&[]).unwrap(), 1);

    // local writes never touch the remote families
    assert_eq!(m.storage_total_write_remote.series_count(), 0);
}

#[test]
fn remote_storage_counters() {
    let r = registry();
    let acc = r.storage_accounting().unwrap();
    let m = r.server();
    let host = StorageHost::remote("hdfs1");
    let labels = [TAG, "hdfs1"];

    acc.inc_storage_retry_counter(&host).unwrap();
    assert_eq!(m.storage_total_write_remote.get(&labels).unwrap(), 1);
    assert_eq!(m.storage_retry_write_remote.get(&labels).unwrap(), 1);

    acc.inc_storage_success_counter(&host).unwrap();
    assert_eq!(m.storage_total_write_remote.get(&labels).unwrap(), 2);
    assert_eq!(m.storage_success_write_remote.get(&labels).unwrap(), 1);

    acc.inc_storage_failed_counter(&host).unwrap();
    assert_eq!(m.storage_total_write_remote.get(&labels).unwrap(), 3);
    assert_eq!(m.storage_failed_write_remote.get(&labels).unwrap(), 1);

    assert_eq!(m.storage_total_write_remote.get(&[TAG, HOST_LABEL_ALL]).unwrap(), 3);
    assert_eq!(m.storage_total_write_local.get(&[]).unwrap(), 0);
}

#[test]
fn outcome_counts_add_up_per_host() {
    let r = registry();
    let acc = r.storage_accounting().unwrap();
    let m = r.server();

    let plan = [("h1", 3, 5, 2), ("h2", 0, 7, 1), ("h3", 4, 0, 0)];
    for (h, retry, success, failed) in plan {
        let host = StorageHost::remote(h);
        for _ in 0..retry {
            acc.inc_storage_retry_counter(&host).unwrap();
        }
        for _ in 0..success {
            acc.inc_storage_success_counter(&host).unwrap();
        }
        for _ in 0..failed {
            acc.inc_storage_failed_counter(&host).unwrap();
        }
    }

    let mut sum_total = 0;
    for (h, retry, success, failed) in plan {
        let labels = [TAG, h];
        assert_eq!(m.storage_retry_write_remote.get(&labels).unwrap(), retry);
        assert_eq!(m.storage_success_write_remote.get(&labels).unwrap(), success);
        assert_eq!(m.storage_failed_write_remote.get(&labels).unwrap(), failed);
        let total = m.storage_total_write_remote.get(&labels).unwrap();
        assert_eq!(total, retry + success + failed, "host={h}");
        sum_total += total;
    }
    assert_eq!(m.storage_total_write_remote.get(&[TAG, HOST_LABEL_ALL]).unwrap(), sum_total);
}

#[test]
fn hadoop_storage_write_data_size() {
    let r = registry();
    let acc = r.storage_accounting().unwrap();
    let m = r.server();

    acc.inc_hadoop_storage_write_data_size("hadoop-cluster01", 1000).unwrap();
    assert_eq!(m.total_hadoop_write_data.get(&[TAG, "hadoop-cluster01"]).unwrap(), 1000);

    acc.inc_hadoop_storage_write_data_size("hadoop-cluster01", 500).unwrap();
    assert_eq!(m.total_hadoop_write_data.get(&[TAG, "hadoop-cluster01"]).unwrap(), 1500);

    acc.inc_hadoop_storage_write_data_size("hadoop-cluster2", 2000).unwrap();
    assert_eq!(m.total_hadoop_write_data.get(&[TAG, "hadoop-cluster2"]).unwrap(), 2000);

    assert_eq!(m.total_hadoop_write_data.get(&[TAG, HOST_LABEL_ALL]).unwrap(), 3500);
}

#[test]
fn reserved_host_is_rejected_before_any_update() {
    let r = registry();
    let acc = r.storage_accounting().unwrap();
    let err = acc
        .inc_storage_success_counter(&StorageHost::remote(HOST_LABEL_ALL))
        .unwrap_err();
    assert!(matches!(err, MetricsError::ReservedLabel { .. }));
    assert_eq!(r.server().storage_total_write_remote.series_count(), 0);
    assert_eq!(r.server().storage_success_write_remote.series_count(), 0);
}

#[test]
fn registered_remote_storage_is_visible_before_traffic() {
    let r = registry();
    let acc = r.storage_accounting().unwrap();
    let host = acc.register_remote_storage("hdfs://hdfs1:9000/rss").unwrap();
    assert_eq!(host, StorageHost::remote("hdfs1"));

    let snapshot = r.snapshot(Scope::Server);
    for name in [
        STORAGE_TOTAL_WRITE_REMOTE,
        STORAGE_SUCCESS_WRITE_REMOTE,
        STORAGE_FAILED_WRITE_REMOTE,
        STORAGE_RETRY_WRITE_REMOTE,
    ] {
        let s = snapshot
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("missing {name}"));
        assert_eq!(s.label_values, vec![TAG.to_string(), "hdfs1".to_string()]);
        assert_eq!(s.value.as_f64(), 0.0);
    }
}

#[test]
fn local_storage_registration_adds_nothing() {
    let r = registry();
    let before = r.snapshot(Scope::Server).len();
    let host = r
        .storage_accounting()
        .unwrap()
        .register_remote_storage("/data1/rss")
        .unwrap();
    assert!(host.is_local());
    assert_eq!(r.snapshot(Scope::Server).len(), before);
}

#[test]
fn write_path_volume_counters() {
    let r = registry();
    let acc = r.storage_accounting().unwrap();
    let m = r.server();

    acc.inc_received_data_size(4096).unwrap();
    acc.record_flush(3000, 3).unwrap();
    acc.record_flush(1000, 1).unwrap();
    acc.inc_write_exception().unwrap();

    assert_eq!(m.total_received_data.get(&[]).unwrap(), 4096);
    assert_eq!(m.total_write_data.get(&[]).unwrap(), 4000);
    assert_eq!(m.total_write_block.get(&[]).unwrap(), 4);
    assert_eq!(m.total_write_exception.get(&[]).unwrap(), 1);
}

#[test]
fn clear_then_init_forgets_previous_series() {
    let r = registry();
    {
        let acc = r.storage_accounting().unwrap();
        acc.inc_storage_success_counter(&StorageHost::remote("hdfs1")).unwrap();
        acc.inc_storage_success_counter(&StorageHost::Local).unwrap();
        acc.inc_hadoop_storage_write_data_size("hdfs1", 10).unwrap();
    }
    r.server().in_flush_buffer_size.inc(42);

    r.clear();
    r.init(ServerTag::new(TAG)).unwrap();

    let snapshot = r.snapshot(Scope::Server);
    assert!(!snapshot.is_empty());
    assert!(snapshot.iter().all(|s| s.value.as_f64() == 0.0));
    assert!(snapshot.iter().all(|s| !s.label_values.contains(&"hdfs1".to_string())));
}

#[test]
fn handle_from_before_clear_is_rejected() {
    let r = MetricsRegistry::new();
    r.init(ServerTag::new("old")).unwrap();
    let acc = r.storage_accounting().unwrap();
    let host = StorageHost::remote("h1");
    acc.inc_storage_success_counter(&host).unwrap();

    r.clear();
    let err = acc.inc_storage_success_counter(&host).unwrap_err();
    assert!(matches!(err, MetricsError::NotInitialized));
    assert_eq!(err.client_code().as_str(), "CONFLICT");

    r.init(ServerTag::new("new")).unwrap();
    assert!(matches!(
        acc.inc_storage_success_counter(&host),
        Err(MetricsError::NotInitialized)
    ));
    assert!(acc.inc_hadoop_storage_write_data_size("h1", 10).is_err());
    assert!(acc.register_remote_storage("hdfs://h1:9000/rss").is_err());
    assert!(acc.record_flush(10, 1).is_err());
    assert!(acc.inc_received_data_size(10).is_err());
    assert!(acc.inc_write_exception().is_err());
    assert!(acc.inc_storage_retry_counter(&StorageHost::Local).is_err());

    let snapshot = r.snapshot(Scope::Server);
    assert!(snapshot.iter().all(|s| !s.label_values.contains(&"old".to_string())));
    assert!(snapshot.iter().all(|s| s.value.as_f64() == 0.0));

    let fresh = r.storage_accounting().unwrap();
    fresh.inc_storage_success_counter(&host).unwrap();
    assert_eq!(
        r.server().storage_total_write_remote.get(&["new", "h1"]).unwrap(),
        1
    );
}

#[test]
fn hadoop_write_size_saturates_at_max() {
    let r = registry();
    let acc = r.storage_accounting().unwrap();
    let m = r.server();

    acc.inc_hadoop_storage_write_data_size("h1", u64::MAX).unwrap();
    acc.inc_hadoop_storage_write_data_size("h1", 2).unwrap();
    assert_eq!(m.total_hadoop_write_data.get(&[TAG, "h1"]).unwrap(), u64::MAX);
    assert_eq!(m.total_hadoop_write_data.get(&[TAG, HOST_LABEL_ALL]).unwrap(), u64::MAX);
}
