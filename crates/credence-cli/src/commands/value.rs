//! Value command implementation.

use credence_value::from_text;

use crate::cli::{ValueAction, ValueArgs};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the value command.
pub fn execute_value(args: ValueArgs, formatter: &Formatter) -> Result<()> {
    match args.action {
        ValueAction::Compare {
            left,
            right,
            tolerance,
        } => {
            let left_value = from_text(&left);
            let right_value = from_text(&right);
            let equal = left_value.equals(&right_value, tolerance);

            let summary = format!(
                "{} {} {}",
                left_value.to_canonical(),
                if equal { "==" } else { "!=" },
                right_value.to_canonical()
            );
            if equal {
                println!("{}", formatter.success(&summary));
            } else {
                println!("{}", formatter.warning(&summary));
            }
        }
        ValueAction::Contains { left, right } => {
            let container = from_text(&left);
            let candidate = from_text(&right);
            let contained = container.contains(&candidate);

            let summary = format!(
                "{} {} {}",
                container.to_canonical(),
                if contained { "contains" } else { "does not contain" },
                candidate.to_canonical()
            );
            if contained {
                println!("{}", formatter.success(&summary));
            } else {
                println!("{}", formatter.warning(&summary));
            }
        }
    }

    Ok(())
}
