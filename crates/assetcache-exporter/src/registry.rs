//! In-process sample registry backing the scrape surface.
//!
//! One `DashMap` per metric family, keyed by sorted label vectors to keep
//! deterministic identity. A sample is the last observed value for its label
//! set: gauges are overwritten each cycle, counters store the cumulative
//! total exactly as reported (resets are not detected). Samples are never
//! evicted, so scrapers keep seeing the last good values between cycles.
//!
//! The collection loop is the single writer; scrape handlers read
//! concurrently. `DashMap::insert` replaces value and labels together, so a
//! reader never observes a sample mixed across cycles.

use std::collections::HashMap;
use std::fmt::Write;

use dashmap::DashMap;

use assetcache_core::catalog::{MetricDef, MetricKind};
use assetcache_core::error::{ExporterError, Result};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

struct MetricFamily {
    name: &'static str,
    kind: MetricKind,
    help: &'static str,
    samples: DashMap<Vec<(String, String)>, f64>,
}

impl MetricFamily {
    /// Render in Prometheus text exposition format.
    fn render(&self, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", self.name, self.help);
        let _ = writeln!(out, "# TYPE {} {}", self.name, self.kind.as_str());
        for r in self.samples.iter() {
            let label_str = r
                .key()
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            if label_str.is_empty() {
                let _ = writeln!(out, "{} {}", self.name, r.value());
            } else {
                let _ = writeln!(out, "{}{{{}}} {}", self.name, label_str, r.value());
            }
        }
    }
}

/// Registered metric families and their current samples.
#[derive(Default)]
pub struct MetricRegistry {
    families: Vec<MetricFamily>,
    index: HashMap<&'static str, usize>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every catalog entry. Registration happens once, before the
    /// collection loop starts.
    pub fn from_catalog(defs: &[MetricDef]) -> Result<Self> {
        let mut registry = Self::new();
        for def in defs {
            registry.register(def)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, def: &MetricDef) -> Result<()> {
        if self.index.contains_key(def.name) {
            return Err(ExporterError::Config(format!(
                "metric registered twice: {}",
                def.name
            )));
        }
        self.index.insert(def.name, self.families.len());
        self.families.push(MetricFamily {
            name: def.name,
            kind: def.kind,
            help: def.help,
            samples: DashMap::new(),
        });
        Ok(())
    }

    /// Record the latest observation for `name` under `labels`.
    pub fn set(&self, name: &str, labels: &[(&str, &str)], value: f64) -> Result<()> {
        let idx = self
            .index
            .get(name)
            .ok_or_else(|| ExporterError::UnknownMetric(name.to_string()))?;
        self.families[*idx].samples.insert(label_key(labels), value);
        Ok(())
    }

    /// Current sample for `name` under `labels`, if one was ever recorded.
    pub fn get(&self, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
        let idx = self.index.get(name)?;
        self.families[*idx]
            .samples
            .get(&label_key(labels))
            .map(|v| *v)
    }

    /// Render all registered families, in registration order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for family in &self.families {
            family.render(&mut out);
        }
        out
    }
}
