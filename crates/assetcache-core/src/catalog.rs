//! Declarative table of exported metrics.
//!
//! Each entry pairs a metric (name, kind, help) with a pure extraction
//! function over one [`StatusSnapshot`]. Extractors return the metric's own
//! labels only; the `server_guid` correlation label is attached by the
//! collection loop. Within one extraction, emitted label sets must be
//! distinct or the later sample shadows the earlier one.
//!
//! Field requirements follow the status tool's contract exactly: the six
//! `CacheDetails` content groups and `ActualCacheUsed` default to 0 when
//! absent, everything else is required.

use crate::error::Result;
use crate::status::StatusSnapshot;

/// Metric shape in the exposition format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Instantaneous value, may rise and fall.
    Gauge,
    /// Cumulative since service start, never decreasing.
    Counter,
}

impl MetricKind {
    /// Exposition-format type name.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
        }
    }
}

/// One extracted sample: value plus metric-specific labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub value: f64,
    pub labels: Vec<(&'static str, String)>,
}

impl Observation {
    fn unlabeled(value: f64) -> Self {
        Self {
            value,
            labels: Vec::new(),
        }
    }

    fn labeled(value: f64, key: &'static str, val: &str) -> Self {
        Self {
            value,
            labels: vec![(key, val.to_string())],
        }
    }
}

type Extractor = fn(&StatusSnapshot) -> Result<Vec<Observation>>;

/// Static metric declaration, defined once at startup.
#[derive(Clone)]
pub struct MetricDef {
    pub name: &'static str,
    pub kind: MetricKind,
    pub help: &'static str,
    pub extract: Extractor,
}

/// `CacheDetails` sub-field -> `cache_group` label value.
const CACHE_GROUPS: [(&str, &str); 6] = [
    ("iCloud", "icloud"),
    ("iOS Software", "ios"),
    ("Mac Software", "macos"),
    ("Apple TV Software", "tvos"),
    ("Books", "books"),
    ("Other", "other"),
];

/// The full set of exported metrics.
pub fn catalog() -> Vec<MetricDef> {
    vec![
        MetricDef {
            name: "assetcache_bytes_limit",
            kind: MetricKind::Gauge,
            help: "cache size limit",
            extract: |s| Ok(vec![Observation::unlabeled(s.bytes("CacheLimit")?)]),
        },
        MetricDef {
            name: "assetcache_bytes_free",
            kind: MetricKind::Gauge,
            help: "free cache size",
            extract: |s| Ok(vec![Observation::unlabeled(s.bytes("CacheFree")?)]),
        },
        MetricDef {
            name: "assetcache_bytes_used_sum",
            kind: MetricKind::Gauge,
            help: "total used cache size",
            extract: |s| Ok(vec![Observation::unlabeled(s.bytes("CacheUsed")?)]),
        },
        MetricDef {
            name: "assetcache_ok",
            kind: MetricKind::Gauge,
            help: "service status is OK",
            extract: |s| {
                // Exact, case-sensitive match; anything else reads as not OK.
                let ok = s.str_field("CacheStatus")? == "OK";
                Ok(vec![Observation::unlabeled(if ok { 1.0 } else { 0.0 })])
            },
        },
        MetricDef {
            name: "assetcache_active",
            kind: MetricKind::Gauge,
            help: "service is active",
            extract: |s| {
                let active = s.bool_field("Active")?;
                Ok(vec![Observation::unlabeled(if active { 1.0 } else { 0.0 })])
            },
        },
        MetricDef {
            name: "assetcache_bytes_used",
            kind: MetricKind::Gauge,
            help: "used cache size",
            extract: |s| {
                let details = s.nested("CacheDetails")?;
                CACHE_GROUPS
                    .iter()
                    .map(|&(field, group)| {
                        Ok(Observation::labeled(
                            details.bytes_or_zero(field)?,
                            "cache_group",
                            group,
                        ))
                    })
                    .collect()
            },
        },
        MetricDef {
            name: "assetcache_bytes_used_actual",
            kind: MetricKind::Gauge,
            help: "actual cache size",
            extract: |s| Ok(vec![Observation::unlabeled(s.bytes_or_zero("ActualCacheUsed")?)]),
        },
        MetricDef {
            name: "assetcache_personal_bytes_free",
            kind: MetricKind::Gauge,
            help: "free personal cache size",
            extract: |s| Ok(vec![Observation::unlabeled(s.bytes("PersonalCacheFree")?)]),
        },
        MetricDef {
            name: "assetcache_personal_bytes_limit",
            kind: MetricKind::Gauge,
            help: "personal cache size limit",
            extract: |s| Ok(vec![Observation::unlabeled(s.bytes("PersonalCacheLimit")?)]),
        },
        MetricDef {
            name: "assetcache_personal_bytes_used",
            kind: MetricKind::Gauge,
            help: "used personal cache size",
            extract: |s| Ok(vec![Observation::unlabeled(s.bytes("PersonalCacheUsed")?)]),
        },
        MetricDef {
            name: "assetcache_start_time_seconds",
            kind: MetricKind::Gauge,
            help: "Unix time of when the service was started",
            extract: |s| {
                Ok(vec![Observation::unlabeled(
                    s.timestamp_seconds("TotalBytesAreSince")?,
                )])
            },
        },
        MetricDef {
            name: "assetcache_bytes_dropped",
            kind: MetricKind::Counter,
            help: "number of bytes dropped from cache since the service was started",
            extract: |s| Ok(vec![Observation::unlabeled(s.bytes("TotalBytesDropped")?)]),
        },
        MetricDef {
            name: "assetcache_bytes_imported",
            kind: MetricKind::Counter,
            help: "number of bytes imported into the cache since the service was started",
            extract: |s| Ok(vec![Observation::unlabeled(s.bytes("TotalBytesImported")?)]),
        },
        MetricDef {
            name: "assetcache_bytes_served",
            kind: MetricKind::Counter,
            help: "total bytes served since the service was started",
            extract: |s| {
                Ok(vec![
                    Observation::labeled(s.bytes("TotalBytesReturnedToClients")?, "to", "clients"),
                    Observation::labeled(s.bytes("TotalBytesReturnedToPeers")?, "to", "peers"),
                    Observation::labeled(s.bytes("TotalBytesReturnedToChildren")?, "to", "children"),
                ])
            },
        },
        MetricDef {
            name: "assetcache_bytes_stored",
            kind: MetricKind::Counter,
            help: "total bytes stored since the service was started",
            extract: |s| {
                Ok(vec![
                    Observation::labeled(s.bytes("TotalBytesStoredFromOrigin")?, "from", "origin"),
                    Observation::labeled(s.bytes("TotalBytesStoredFromParents")?, "from", "parents"),
                    Observation::labeled(s.bytes("TotalBytesStoredFromPeers")?, "from", "peers"),
                ])
            },
        },
    ]
}
