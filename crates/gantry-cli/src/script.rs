use crate::filter::LineFilter;
use gantry_core::{AppConfig, GantryError, GantryResult};
use gantry_domain::commands::{Grip, Home, Jog, Release, Square};
use gantry_domain::{Axis, Command, Rig};

/// One executable command parsed from a script line.
pub struct ParsedCommand {
    pub line: usize,
    pub description: String,
    pub command: Box<dyn Command<Rig>>,
}

impl std::fmt::Debug for ParsedCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedCommand")
            .field("line", &self.line)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Parse a motion script into commands, in script order.
///
/// Blank lines and `#` comments are skipped. When a filter is given,
/// lines it rejects are skipped too. Parse failures carry the
/// one-based line number of the offending line.
pub fn parse_script(
    source: &str,
    filter: Option<&LineFilter>,
    config: &AppConfig,
) -> GantryResult<Vec<ParsedCommand>> {
    let mut parsed = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(filter) = filter {
            if !filter.matches(line) {
                tracing::debug!("Filtered out line {}: {}", line_no, line);
                continue;
            }
        }
        let command = parse_line(line, config).map_err(|e| GantryError::Script {
            line: line_no,
            source: Box::new(e),
        })?;
        parsed.push(ParsedCommand {
            line: line_no,
            description: command.description(),
            command,
        });
    }
    Ok(parsed)
}

fn parse_line(line: &str, config: &AppConfig) -> GantryResult<Box<dyn Command<Rig>>> {
    let mut tokens = line.split_whitespace();
    let Some(verb) = tokens.next() else {
        return Err(GantryError::Validation("empty command line".to_string()));
    };
    let args: Vec<&str> = tokens.collect();

    match verb {
        "jog" => parse_jog(&args, config),
        "home" => {
            ensure_no_args("home", &args)?;
            Ok(Box::new(Home::new()))
        }
        "square" => parse_square(&args),
        "grip" => {
            ensure_no_args("grip", &args)?;
            Ok(Box::new(Grip))
        }
        "release" => {
            ensure_no_args("release", &args)?;
            Ok(Box::new(Release))
        }
        other => Err(GantryError::UnknownCommand(other.to_string())),
    }
}

fn parse_jog(args: &[&str], config: &AppConfig) -> GantryResult<Box<dyn Command<Rig>>> {
    if args.len() > 2 {
        return Err(GantryError::Validation(format!(
            "jog takes an axis and an optional distance, got {} arguments",
            args.len()
        )));
    }
    let token = args
        .first()
        .ok_or_else(|| GantryError::Validation("jog requires an axis".to_string()))?;
    let axis = parse_axis(token)?;
    let delta = match args.get(1) {
        Some(token) => token.parse::<i64>().map_err(|_| {
            GantryError::Validation(format!("invalid jog distance: {}", token))
        })?,
        None => config.effective_default_jog_distance(),
    };
    Ok(Box::new(Jog { axis, delta }))
}

fn parse_square(args: &[&str]) -> GantryResult<Box<dyn Command<Rig>>> {
    if args.len() != 1 {
        return Err(GantryError::Validation(
            "square requires exactly one side length".to_string(),
        ));
    }
    let side = args[0]
        .parse::<i64>()
        .map_err(|_| GantryError::Validation(format!("invalid side length: {}", args[0])))?;
    if side <= 0 {
        return Err(GantryError::Validation(format!(
            "square side must be positive, got {}",
            side
        )));
    }
    Ok(Box::new(Square { side }))
}

fn parse_axis(token: &str) -> GantryResult<Axis> {
    match token.to_ascii_lowercase().as_str() {
        "x" => Ok(Axis::X),
        "y" => Ok(Axis::Y),
        "z" => Ok(Axis::Z),
        other => Err(GantryError::Validation(format!("unknown axis: {}", other))),
    }
}

fn ensure_no_args(verb: &str, args: &[&str]) -> GantryResult<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(GantryError::Validation(format!(
            "{} takes no arguments",
            verb
        )))
    }
}
