//! Pure functions for calculating deployment plans.

use super::config::{GsiConfig, TableConfig};

/// Observed state of an existing table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub active: bool,
    pub gsis: Vec<GsiState>,
}

#[derive(Debug, Clone)]
pub struct GsiState {
    pub name: String,
    pub active: bool,
}

impl TableState {
    /// True once the table and all of its indexes accept traffic.
    pub fn is_ready(&self) -> bool {
        self.active && self.gsis.iter().all(|g| g.active)
    }
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    CreateTable { config: TableConfig },
    AddGsis {
        table_name: String,
        gsis_to_add: Vec<GsiConfig>,
    },
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    DeleteTable { table_name: String },
    AlreadyGone { table_name: String },
}

/// Calculate the changes needed to bring `current` to `desired`.
///
/// Existing indexes are never dropped or altered; only missing ones are added.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    let Some(state) = current else {
        return DeployPlan::CreateTable {
            config: desired.clone(),
        };
    };

    let gsis_to_add: Vec<GsiConfig> = desired
        .gsis
        .iter()
        .filter(|gsi| !state.gsis.iter().any(|g| g.name == gsi.name))
        .cloned()
        .collect();

    let table_name = desired.table_name.clone();
    if gsis_to_add.is_empty() {
        DeployPlan::NoChanges { table_name }
    } else {
        DeployPlan::AddGsis {
            table_name,
            gsis_to_add,
        }
    }
}

pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    let table_name = table_name.to_string();
    match current {
        Some(_) => DestroyPlan::DeleteTable { table_name },
        None => DestroyPlan::AlreadyGone { table_name },
    }
}

fn format_gsi(gsi: &GsiConfig, marker: &str) -> Vec<String> {
    vec![
        format!("  {} GSI: {}", marker, gsi.name),
        format!("    Partition key: {} (S)", gsi.partition_key),
        format!("    Sort key: {} (S)", gsi.sort_key),
    ]
}

/// Render a deploy plan, one line per change.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => {
            let mut lines = vec![
                format!("+ Create table: {}", config.table_name),
                format!("  Partition key: {} (S)", config.partition_key),
                format!("  Sort key: {} (S)", config.sort_key),
            ];
            for gsi in &config.gsis {
                lines.extend(format_gsi(gsi, "+"));
            }
            lines.push("  Billing: PAY_PER_REQUEST".to_string());
            lines
        }
        DeployPlan::AddGsis {
            table_name,
            gsis_to_add,
        } => {
            let mut lines = vec![format!("~ Update table: {}", table_name)];
            for gsi in gsis_to_add {
                lines.extend(format_gsi(gsi, "+ Add"));
            }
            lines
        }
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!("- Delete table: {table_name} (ALL QUOTES WILL BE LOST)")]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}
