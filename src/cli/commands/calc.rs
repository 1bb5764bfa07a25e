use moneybook_core::{parse_keys, Calculator, CalculatorFault};

use crate::cli::context::ShellContext;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::errors::{CommandError, CommandResult};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "calc",
        "Run keypad input through the amount calculator",
        "calc <keys...>   e.g. calc 12.5 + 3 =",
        cmd_calc,
    )
    .with_aliases(&["keypad"])]
}

fn cmd_calc(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: calc <keys...>".into(),
        ));
    }
    let keys = parse_keys(&args.join(" "))?;
    let mut calculator = Calculator::new();
    calculator.press_all(keys);

    output::info(format!("Display: {}", calculator.display()));
    let money = context.amount_format();
    output::info(format!(
        "Amount:  {}",
        money.amount(calculator.committed_amount())
    ));
    match calculator.fault() {
        Some(CalculatorFault::DivisionByZero) => {
            output::warning("division by zero; the value was reset to 0")
        }
        Some(CalculatorFault::Overflow) => {
            output::warning("result out of range; the value was reset to 0")
        }
        None => {}
    }
    Ok(())
}
