//! Console commands.

use std::str::FromStr;

use escrow_grid::PageTarget;

use crate::error::CommandError;

/// Help text listing every command.
pub const HELP: &str = "\
commands:
  show                      redraw the grid
  search <field> <text>     filter the fetched rows (empty text clears)
  clear                     clear every search field
  sort <column>             sort, or flip the sort direction
  page first|prev|next|last|<n>
  rows <n>                  rows per page
  select <row>              toggle row selection
  expand <row>              toggle row details
  view <row>                print a row
  set <row> <field> <value> edit a field (JSON or text)
  selected                  list selected rows
  help
  quit";

/// A parsed console line. Row numbers are 1-based positions on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Search { field: String, value: String },
    Clear,
    Sort(String),
    Page(PageTarget),
    Rows(usize),
    Select(usize),
    Expand(usize),
    View(usize),
    Set { row: usize, field: String, value: String },
    Selected,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match name.to_ascii_lowercase().as_str() {
            "" | "show" => Ok(Command::Show),
            "search" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandError::Usage("search <field> <text>"));
                }
                Ok(Command::Search {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                })
            }
            "clear" => Ok(Command::Clear),
            "sort" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("sort <column>"));
                }
                Ok(Command::Sort(rest.to_string()))
            }
            "page" => page_target(rest).map(Command::Page),
            "rows" => number(rest, "rows <n>").map(Command::Rows),
            "select" => row(rest, "select <row>").map(Command::Select),
            "expand" => row(rest, "expand <row>").map(Command::Expand),
            "view" => row(rest, "view <row>").map(Command::View),
            "set" => {
                const USAGE: &str = "set <row> <field> <value>";
                let mut parts = rest.splitn(3, char::is_whitespace);
                let (Some(index), Some(field)) = (parts.next(), parts.next()) else {
                    return Err(CommandError::Usage(USAGE));
                };
                Ok(Command::Set {
                    row: row(index, USAGE)?,
                    field: field.to_string(),
                    value: parts.next().unwrap_or("").trim().to_string(),
                })
            }
            "selected" => Ok(Command::Selected),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn page_target(arg: &str) -> Result<PageTarget, CommandError> {
    match arg.to_ascii_lowercase().as_str() {
        "first" => Ok(PageTarget::First),
        "prev" | "previous" => Ok(PageTarget::Previous),
        "next" | "" => Ok(PageTarget::Next),
        "last" => Ok(PageTarget::Last),
        _ => number(arg, "page first|prev|next|last|<n>").map(PageTarget::Goto),
    }
}

fn number(arg: &str, usage: &'static str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    arg.parse()
        .map_err(|_| CommandError::NotANumber(arg.to_string()))
}

/// A 1-based row number turned into a page position.
fn row(arg: &str, usage: &'static str) -> Result<usize, CommandError> {
    match number(arg, usage)? {
        0 => Err(CommandError::Usage(usage)),
        n => Ok(n - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, CommandError> {
        line.parse()
    }

    #[test]
    fn test_search_keeps_spaces_in_text() {
        assert_eq!(
            parse("search name  gold partner ").unwrap(),
            Command::Search {
                field: "name".into(),
                value: "gold partner".into(),
            }
        );
        assert_eq!(
            parse("search name").unwrap(),
            Command::Search {
                field: "name".into(),
                value: String::new(),
            }
        );
        assert_eq!(parse("search"), Err(CommandError::Usage("search <field> <text>")));
    }

    #[test]
    fn test_page_targets() {
        assert_eq!(parse("page").unwrap(), Command::Page(PageTarget::Next));
        assert_eq!(parse("PAGE prev").unwrap(), Command::Page(PageTarget::Previous));
        assert_eq!(parse("page 4").unwrap(), Command::Page(PageTarget::Goto(4)));
        assert_eq!(parse("page four"), Err(CommandError::NotANumber("four".into())));
    }

    #[test]
    fn test_rows_are_one_based() {
        assert_eq!(parse("select 1").unwrap(), Command::Select(0));
        assert_eq!(parse("view 3").unwrap(), Command::View(2));
        assert_eq!(parse("expand 0"), Err(CommandError::Usage("expand <row>")));
    }

    #[test]
    fn test_set() {
        assert_eq!(
            parse("set 2 status In review").unwrap(),
            Command::Set {
                row: 1,
                field: "status".into(),
                value: "In review".into(),
            }
        );
        assert!(parse("set 2").is_err());
    }

    #[test]
    fn test_blank_line_redraws() {
        assert_eq!(parse("   ").unwrap(), Command::Show);
        assert_eq!(parse("q").unwrap(), Command::Quit);
        assert_eq!(parse("launch"), Err(CommandError::Unknown("launch".into())));
    }
}
