//! Read-only reference tables shared by every request in a session

use std::collections::{HashMap, HashSet};

use log::info;

use crate::config::DataConfig;
use crate::error::LoadError;
use crate::records::{
    load_baseline_records, load_event_records, load_statements, BaselineRecord, EventRecord,
    EventType, StatementEntry,
};

#[derive(Debug, Clone, Default)]
struct EventTables {
    events: Vec<EventRecord>,
    baselines: Vec<BaselineRecord>,
}

/// Immutable handle over the loaded tables.
///
/// Built once and passed by reference into request handling. Lookups are
/// exact string matches and the first matching row wins.
#[derive(Debug, Clone, Default)]
pub struct DataSource {
    tables: HashMap<EventType, EventTables>,
    /// Statement history per symbol, in file order
    statements: HashMap<String, Vec<StatementEntry>>,
}

impl DataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every table named in the config
    pub fn load(config: &DataConfig) -> Result<Self, LoadError> {
        let mut source = Self::new();

        for event_type in EventType::ALL {
            if let Some(path) = config.event_table(event_type) {
                source = source.with_events(event_type, load_event_records(&path, event_type)?);
            }
            if let Some(path) = config.baseline_table(event_type) {
                source = source.with_baselines(event_type, load_baseline_records(&path)?);
            }
        }
        if let Some(path) = config.statements_table() {
            source = source.with_statements(load_statements(&path)?);
        }

        info!(
            "Data source ready: {} inflation symbols, {} interest rate symbols, {} statement series",
            source.symbols(EventType::Inflation).len(),
            source.symbols(EventType::InterestRate).len(),
            source.statements.len()
        );
        Ok(source)
    }

    pub fn with_events(mut self, event_type: EventType, events: Vec<EventRecord>) -> Self {
        self.tables.entry(event_type).or_default().events.extend(events);
        self
    }

    pub fn with_baselines(mut self, event_type: EventType, baselines: Vec<BaselineRecord>) -> Self {
        self.tables.entry(event_type).or_default().baselines.extend(baselines);
        self
    }

    pub fn with_statements(mut self, entries: Vec<StatementEntry>) -> Self {
        for entry in entries {
            self.statements.entry(entry.symbol.clone()).or_default().push(entry);
        }
        self
    }

    /// Event record for `symbol` under `event_type`
    pub fn event(&self, event_type: EventType, symbol: &str) -> Option<&EventRecord> {
        self.tables
            .get(&event_type)?
            .events
            .iter()
            .find(|record| record.symbol == symbol)
    }

    /// Baseline record for `stock_name` under `event_type`
    pub fn baseline(&self, event_type: EventType, stock_name: &str) -> Option<&BaselineRecord> {
        self.tables
            .get(&event_type)?
            .baselines
            .iter()
            .find(|record| record.stock_name == stock_name)
    }

    /// Most recent statement entry for `symbol`; on equal dates the later row wins
    pub fn latest_statement(&self, symbol: &str) -> Option<&StatementEntry> {
        self.statements
            .get(symbol)?
            .iter()
            .max_by_key(|entry| entry.date)
    }

    /// Symbols with both an event and a baseline record, in event-table order
    pub fn symbols(&self, event_type: EventType) -> Vec<&str> {
        let Some(tables) = self.tables.get(&event_type) else {
            return Vec::new();
        };

        let baselines: HashSet<&str> = tables
            .baselines
            .iter()
            .map(|record| record.stock_name.as_str())
            .collect();
        let mut seen = HashSet::new();

        tables
            .events
            .iter()
            .map(|record| record.symbol.as_str())
            .filter(|symbol| baselines.contains(symbol) && seen.insert(*symbol))
            .collect()
    }
}
