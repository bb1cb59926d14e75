//! `padctl decode`: run one input report through the bound driver.

use anyhow::Result;
use padbridge_engine::{DriverFamily, OutputSink, create_driver, resolve_family};
use padbridge_model::Controller;

use crate::commands::IdentityArgs;
use crate::error::CliError;
use crate::hex::parse_hex_bytes;
use crate::output;
use crate::replay::LoggingTransport;

pub fn decode(args: &IdentityArgs, report: &str) -> Result<(DriverFamily, Controller), CliError> {
    let bytes = parse_hex_bytes(report)?;
    let identity = args.identity();
    let family =
        resolve_family(&identity).ok_or_else(|| CliError::NoDriver(identity.display_name()))?;

    let transport = LoggingTransport::default();
    let mut sink = OutputSink::new(&transport, 0);
    let mut driver = create_driver(family, &identity);
    let mut controller = Controller::default();
    driver.init_report(&mut controller);
    driver.parse_input_report(&mut controller, &bytes, &mut sink)?;
    Ok((family, controller))
}

pub fn execute(args: &IdentityArgs, report: &str, json: bool) -> Result<()> {
    let (family, controller) = decode(args, report)?;
    output::print_controller(family, &controller, json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use padbridge_errors::DecodeError;
    use padbridge_model::gamepad::BUTTON_A;

    fn xbox() -> IdentityArgs {
        IdentityArgs {
            vid: 0x045E,
            pid: 0x02FD,
            name: String::new(),
            cod: 0,
        }
    }

    #[test]
    fn test_decode_xbox() -> Result<(), Box<dyn std::error::Error>> {
        let (family, controller) = decode(&xbox(), "01 0080 0080 0080 0080 0000 0000 00 0100")?;
        assert_eq!(family, DriverFamily::Xbox);
        let gp = controller.gamepad().ok_or("not a gamepad")?;
        assert!(gp.pressed(BUTTON_A));
        assert_eq!(gp.axis_x, 0);
        Ok(())
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode(&xbox(), "01 00"),
            Err(CliError::Decode(DecodeError::Truncated { .. }))
        ));
        assert!(matches!(decode(&xbox(), "0"), Err(CliError::InvalidHex(_))));
    }
}
