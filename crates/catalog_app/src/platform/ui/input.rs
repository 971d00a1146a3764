use catalog_core::{ComicId, Msg, StatusFilter};

pub const HELP: &str = "\
Commands:
  search <text>     filter titles (no text clears the search)
  status <filter>   all | free_ongoing | free_completed | paid
  clear             clear search and status filter
  page <n>          jump to page n
  next / prev       move one page
  open <id>         show one comic
  back              return to the catalog
  reload            fetch the catalog again
  help              show this text
  quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Update(Msg),
    Redraw,
    Help,
    Quit,
}

/// Parse one line typed in the interactive session.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let msg = match verb.to_ascii_lowercase().as_str() {
        "" => return Ok(Command::Redraw),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        "search" | "/" => Msg::SearchChanged(rest.to_string()),
        "status" => {
            let filter: StatusFilter = rest.parse().map_err(|err| format!("{err}"))?;
            Msg::StatusFilterChanged(filter)
        }
        "clear" => Msg::FiltersCleared,
        "page" => {
            let page = rest
                .parse::<usize>()
                .map_err(|_| format!("not a page number: '{rest}'"))?;
            Msg::PageRequested(page)
        }
        "next" | "n" => Msg::NextPage,
        "prev" | "p" => Msg::PrevPage,
        "open" => {
            if rest.is_empty() {
                return Err("open needs a comic id".to_string());
            }
            Msg::DetailRequested(ComicId::from(rest))
        }
        "back" | "b" => Msg::BackToCatalog,
        "reload" => Msg::ReloadRequested,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Command::Update(msg))
}
