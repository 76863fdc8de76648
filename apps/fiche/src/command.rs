/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	Search(String),
	Results,
	/// Opens the n-th (1-based) result.
	Open(usize),
	History,
	/// Activates the n-th history row.
	Go(usize),
	Remove(usize),
	Fold(usize),
	Sidebar,
	About,
	Help,
	Quit,
	Empty,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
	#[error("`{command}` expects a number, got `{arg}`.")]
	InvalidIndex { command: String, arg: String },
	#[error("`{command}` expects a number.")]
	MissingIndex { command: String },
	#[error("`search` expects query text.")]
	MissingQuery,
}

pub const HELP: &str = "\
Commands:
  search <text>   search (bare text works too)
  results         show the current results
  open <n>        open result n and record the visit
  history         show the history tree
  go <n>          open an article row, or replay a query row
  rm <n>          delete a history row
  fold <n>        collapse or expand a query row
  sidebar         show or hide the history tree
  about           about this program
  help            show this help
  quit            exit";

/// Parses one input line; anything that is not a known command is a search.
pub fn parse(line: &str) -> Result<Command, ParseError> {
	let line = line.trim();

	if line.is_empty() {
		return Ok(Command::Empty);
	}

	let (head, rest) = match line.split_once(char::is_whitespace) {
		Some((head, rest)) => (head, rest.trim()),
		None => (line, ""),
	};
	let command = match head.to_ascii_lowercase().as_str() {
		"search" | "s" if rest.is_empty() => return Err(ParseError::MissingQuery),
		"search" | "s" => Command::Search(rest.to_string()),
		"results" | "r" if rest.is_empty() => Command::Results,
		"open" | "o" => Command::Open(index("open", rest)?),
		"history" | "h" if rest.is_empty() => Command::History,
		"go" | "g" => Command::Go(index("go", rest)?),
		"rm" | "delete" => Command::Remove(index("rm", rest)?),
		"fold" | "f" => Command::Fold(index("fold", rest)?),
		"sidebar" if rest.is_empty() => Command::Sidebar,
		"about" if rest.is_empty() => Command::About,
		"help" | "?" if rest.is_empty() => Command::Help,
		"quit" | "exit" | "q" if rest.is_empty() => Command::Quit,
		_ => Command::Search(line.to_string()),
	};

	Ok(command)
}

fn index(command: &str, arg: &str) -> Result<usize, ParseError> {
	if arg.is_empty() {
		return Err(ParseError::MissingIndex { command: command.to_string() });
	}

	match arg.parse::<usize>() {
		Ok(n) if n > 0 => Ok(n),
		_ => Err(ParseError::InvalidIndex { command: command.to_string(), arg: arg.to_string() }),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bare_text_is_a_search() {
		assert_eq!(parse("  rust borrow checker ").expect("Parse failed."), Command::Search(
			"rust borrow checker".to_string()
		));
		assert_eq!(parse("history of rome").expect("Parse failed."), Command::Search(
			"history of rome".to_string()
		));
	}

	#[test]
	fn parses_indexed_commands() {
		assert_eq!(parse("open 2").expect("Parse failed."), Command::Open(2));
		assert_eq!(parse("GO 1").expect("Parse failed."), Command::Go(1));
		assert_eq!(parse("rm 3").expect("Parse failed."), Command::Remove(3));
		assert_eq!(parse("fold  4").expect("Parse failed."), Command::Fold(4));
	}

	#[test]
	fn rejects_bad_indexes() {
		assert_eq!(parse("open"), Err(ParseError::MissingIndex { command: "open".to_string() }));
		assert_eq!(
			parse("go zero"),
			Err(ParseError::InvalidIndex { command: "go".to_string(), arg: "zero".to_string() })
		);
		assert_eq!(
			parse("rm 0"),
			Err(ParseError::InvalidIndex { command: "rm".to_string(), arg: "0".to_string() })
		);
	}

	#[test]
	fn parses_plain_commands() {
		assert_eq!(parse("").expect("Parse failed."), Command::Empty);
		assert_eq!(parse("results").expect("Parse failed."), Command::Results);
		assert_eq!(parse("sidebar").expect("Parse failed."), Command::Sidebar);
		assert_eq!(parse("about").expect("Parse failed."), Command::About);
		assert_eq!(parse("?").expect("Parse failed."), Command::Help);
		assert_eq!(parse("quit").expect("Parse failed."), Command::Quit);
		assert_eq!(parse("search cats").expect("Parse failed."), Command::Search("cats".into()));
		assert_eq!(parse("search"), Err(ParseError::MissingQuery));
	}
}
