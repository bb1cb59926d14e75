//! `padctl bind`: which driver a device would get.

use anyhow::Result;
use padbridge_engine::{DriverFamily, RuleKind, create_driver, resolve_rule};
use padbridge_model::ControllerClass;
use serde::Serialize;

use crate::commands::IdentityArgs;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
pub struct BindReport {
    pub identity: String,
    pub family: DriverFamily,
    pub rule: RuleKind,
    pub class: ControllerClass,
    pub capabilities: Vec<&'static str>,
}

pub fn build_report(args: &IdentityArgs) -> Result<BindReport, CliError> {
    let identity = args.identity();
    let rule = resolve_rule(&identity).ok_or_else(|| CliError::NoDriver(identity.display_name()))?;
    let driver = create_driver(rule.family, &identity);
    Ok(BindReport {
        identity: identity.display_name(),
        family: rule.family,
        rule: rule.kind,
        class: driver.class(),
        capabilities: driver.capabilities().names(),
    })
}

pub fn execute(args: &IdentityArgs, json: bool) -> Result<()> {
    let report = build_report(args)?;
    output::print_bind(&report, json);
    Ok(())
}
