use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use dicecup_engine::{DiceRoller, KeyValueStore, StoreError};
use tracing::debug;

use crate::output::{render_page, render_theme, Format};

/// Run the roller's clock in real time until no reveal is pending.
pub fn wait_for_roll<S: KeyValueStore>(roller: &mut DiceRoller<S>) -> Result<(), StoreError> {
    while let Some(deadline) = roller.next_deadline() {
        let wait = deadline.saturating_sub(roller.now());
        if wait > 0 {
            thread::sleep(Duration::from_millis(wait));
        }
        roller.advance(wait)?;
    }
    Ok(())
}

/// Submit one roll request, print the placeholder (or the error), then the outcome.
/// Returns false when the input was rejected.
pub fn roll_and_show<S: KeyValueStore, W: Write>(
    roller: &mut DiceRoller<S>,
    raw: &str,
    out: &mut W,
    format: Format,
) -> anyhow::Result<bool> {
    let accepted = roller.roll(raw).is_ok();
    if !accepted || format == Format::Text {
        writeln!(out, "{}", render_page(roller.page(), format)?)?;
    }
    if accepted {
        wait_for_roll(roller)?;
        writeln!(out, "{}", render_page(roller.page(), format)?)?;
    }
    Ok(accepted)
}

/// Line-oriented stand-in for the page: each line is a dice count, or one of
/// `reset`, `theme`, `quit`.
pub fn play<S: KeyValueStore, R: BufRead, W: Write>(
    roller: &mut DiceRoller<S>,
    input: R,
    mut out: W,
    format: Format,
) -> anyhow::Result<()> {
    writeln!(out, "{}", render_theme(roller.page(), format)?)?;
    writeln!(out, "{}", render_page(roller.page(), format)?)?;
    for line in input.lines() {
        let line = line?;
        let cmd = line.trim();
        debug!(command = cmd, "session input");
        match cmd {
            "" => continue,
            "quit" | "exit" => break,
            "reset" => {
                roller.reset()?;
                writeln!(out, "{}", render_page(roller.page(), format)?)?;
            }
            "theme" => {
                roller.toggle_theme()?;
                writeln!(out, "{}", render_theme(roller.page(), format)?)?;
            }
            raw => {
                roll_and_show(roller, raw, &mut out, format)?;
            }
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicecup_engine::{Dice, MemoryStore, RollerConfig};

    fn roller(script: Vec<u8>) -> DiceRoller<MemoryStore> {
        let config = RollerConfig {
            roll_delay_ms: 1,
            ..RollerConfig::default()
        };
        DiceRoller::new(config, Dice::from_scripted(script), MemoryStore::new())
    }

    #[test]
    fn session_rolls_toggles_and_quits() {
        let mut r = roller(vec![3, 6, 1, 4]);
        let input = b"4\n0\ntheme\nquit\n9\n" as &[u8];
        let mut out = Vec::new();
        play(&mut r, input, &mut out, Format::Text).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Theme: dark (toggle: Light Mode)\nReady to roll!\n"));
        assert!(text.contains("Rolling dice...\nDice rolled: 3, 6, 1, 4\n"));
        assert!(text.contains("Average: 3.50"));
        assert!(text.contains("⚠ Number of dice must be greater than 0."));
        assert!(text.contains("Theme: light (toggle: Dark Mode)"));
        assert_eq!(text.matches("Dice rolled").count(), 1, "input after quit is ignored");
    }

    #[test]
    fn wait_for_roll_drains_the_queue() {
        let mut r = roller(vec![2]);
        r.roll("1").unwrap();
        wait_for_roll(&mut r).unwrap();
        assert!(!r.is_rolling());
        assert_eq!(r.view().message, "Dice rolled: 2");
    }
}
