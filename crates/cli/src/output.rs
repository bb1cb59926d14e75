//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use padbridge_engine::{DeviceInfo, DriverFamily};
use padbridge_model::{Controller, ControllerData};
use serde::Serialize;
use serde_json::json;

use crate::commands::bind::BindReport;
use crate::replay::ReplayOutcome;

fn print_json<T: Serialize>(value: &T) {
    let output = json!({
        "success": true,
        "data": value,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format output as JSON: {}", e),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

pub fn print_bind(report: &BindReport, json: bool) {
    if json {
        print_json(report);
        return;
    }
    println!("{} {}", "Device:".bold(), report.identity);
    println!("  {} {}", "Driver:".bold(), report.family.to_string().green());
    println!("  {} {:?}", "Matched by:".bold(), report.rule);
    println!("  {} {:?}", "Class:".bold(), report.class);
    if report.capabilities.is_empty() {
        println!("  {} {}", "Output:".bold(), "none".dimmed());
    } else {
        println!("  {} {}", "Output:".bold(), report.capabilities.join(", "));
    }
}

pub fn print_controller(family: DriverFamily, controller: &Controller, json: bool) {
    if json {
        print_json(&json!({ "family": family, "controller": controller }));
        return;
    }
    println!("{} {}", "Decoded by:".bold(), family.to_string().green());
    println!("  {} {}", "Battery:".bold(), controller.battery);
    match &controller.data {
        ControllerData::Gamepad(gp) => {
            println!(
                "  {} x={} y={} rx={} ry={}",
                "Sticks:".bold(),
                gp.axis_x,
                gp.axis_y,
                gp.axis_rx,
                gp.axis_ry
            );
            println!("  {} brake={} throttle={}", "Pedals:".bold(), gp.brake, gp.throttle);
            println!(
                "  {} buttons=0x{:04X} misc=0x{:04X} dpad=0x{:02X}",
                "Buttons:".bold(),
                gp.buttons,
                gp.misc_buttons,
                gp.dpad
            );
        }
        other => println!("  {:?}", other),
    }
}

fn print_device_human(device: &DeviceInfo) {
    let state = device.state.as_str();
    let marker = if device.state.is_active() {
        "●".green()
    } else {
        "●".red()
    };
    println!(
        "  {} {} [{}] {} seat {:?}",
        marker,
        device.name.bold(),
        device.address,
        state,
        device.seat
    );
}

pub fn print_replay(outcome: &ReplayOutcome, json: bool) {
    if json {
        print_json(outcome);
        return;
    }
    let s = &outcome.stats;
    println!("{}", "Replay finished".bold());
    println!(
        "  {} events, {} committed, {} dropped, {} failed",
        s.events, s.committed, s.dropped, s.errors
    );
    println!(
        "  {} output reports, {} seat toggles, {} joystick frames",
        s.output_reports,
        s.seat_toggles,
        outcome.frames.len()
    );
    if outcome.devices.is_empty() {
        println!("{}", "No devices left connected".yellow());
    } else {
        println!("{}", "Devices:".bold());
        for device in &outcome.devices {
            print_device_human(device);
        }
    }
}
