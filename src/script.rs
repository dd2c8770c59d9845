//! Line-oriented scripts of user actions.
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! add Review
//! connect 1 4
//! complete 1
//! delete 3
//! show
//! ```

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use stepflow_graph::{Connection, GraphError, GraphStore, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Add(Option<String>),
  Connect(NodeId, NodeId),
  Disconnect(NodeId, NodeId),
  Rename(NodeId, String),
  Complete(NodeId),
  Delete(Vec<NodeId>),
  Show,
}

impl fmt::Display for Command {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Command::Add(None) => write!(f, "add"),
      Command::Add(Some(label)) => write!(f, "add {label}"),
      Command::Connect(source, target) => write!(f, "connect {source} {target}"),
      Command::Disconnect(source, target) => write!(f, "disconnect {source} {target}"),
      Command::Rename(node_id, label) => write!(f, "rename {node_id} {label}"),
      Command::Complete(node_id) => write!(f, "complete {node_id}"),
      Command::Delete(node_ids) => {
        write!(f, "delete")?;
        for node_id in node_ids {
          write!(f, " {node_id}")?;
        }
        Ok(())
      }
      Command::Show => write!(f, "show"),
    }
  }
}

fn parse_id(token: Option<&str>, what: &str) -> Result<NodeId> {
  let token = token.ok_or_else(|| anyhow!("missing {what}"))?;
  token
    .parse()
    .with_context(|| format!("invalid {what}: '{token}'"))
}

impl FromStr for Command {
  type Err = anyhow::Error;

  fn from_str(line: &str) -> Result<Self> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let mut args = rest.split_whitespace();

    let command = match verb {
      "add" => Command::Add((!rest.is_empty()).then(|| rest.to_string())),
      "connect" => Command::Connect(
        parse_id(args.next(), "source node")?,
        parse_id(args.next(), "target node")?,
      ),
      "disconnect" => Command::Disconnect(
        parse_id(args.next(), "source node")?,
        parse_id(args.next(), "target node")?,
      ),
      "rename" => {
        let node_id = parse_id(args.next(), "node")?;
        let label = rest
          .split_once(char::is_whitespace)
          .map(|(_, label)| label.trim())
          .filter(|label| !label.is_empty())
          .ok_or_else(|| anyhow!("missing label"))?;
        Command::Rename(node_id, label.to_string())
      }
      "complete" => Command::Complete(parse_id(args.next(), "node")?),
      "delete" => {
        let node_ids = args
          .by_ref()
          .map(|token| parse_id(Some(token), "node"))
          .collect::<Result<Vec<_>>>()?;
        if node_ids.is_empty() {
          bail!("missing node");
        }
        return Ok(Command::Delete(node_ids));
      }
      "show" => Command::Show,
      other => bail!("unknown command: '{other}'"),
    };

    if let Some(extra) = args.next()
      && !matches!(command, Command::Add(_) | Command::Rename(..))
    {
      bail!("unexpected argument: '{extra}'");
    }
    Ok(command)
  }
}

/// Parse a script into `(line number, command)` pairs, skipping blanks and comments.
pub fn parse_script(input: &str) -> Result<Vec<(usize, Command)>> {
  input
    .lines()
    .enumerate()
    .map(|(index, line)| (index + 1, line.split('#').next().unwrap_or("").trim()))
    .filter(|(_, line)| !line.is_empty())
    .map(|(number, line)| {
      line
        .parse()
        .map(|command| (number, command))
        .with_context(|| format!("line {number}: {line}"))
    })
    .collect()
}

/// Apply one command and describe what happened.
pub fn apply(store: &mut GraphStore, command: &Command) -> Result<String, GraphError> {
  let report = match command {
    Command::Add(label) => {
      let node_id = store.add_node(label.clone());
      format!("added node {node_id}")
    }
    Command::Connect(source, target) => match store.add_edge(*source, *target)? {
      Connection::Connected(edge_id) => format!("connected {edge_id}"),
      Connection::AlreadyConnected(edge_id) => format!("already connected {edge_id}"),
      Connection::Rejected(reason) => format!("rejected {source} -> {target}: {reason}"),
    },
    Command::Disconnect(source, target) => {
      if store.remove_edge(*source, *target)? {
        format!("disconnected {source} -> {target}")
      } else {
        format!("no edge {source} -> {target}")
      }
    }
    Command::Rename(node_id, label) => {
      store.set_label(*node_id, label.clone())?;
      format!("renamed node {node_id}")
    }
    Command::Complete(node_id) => {
      let outcome = store.complete(*node_id)?;
      if outcome.is_completed() {
        format!("completed node {node_id}")
      } else {
        format!("node {node_id} not available: {outcome:?}")
      }
    }
    Command::Delete(node_ids) => {
      let removals = store.remove_nodes(node_ids)?;
      let synthesized: Vec<String> = removals
        .iter()
        .flat_map(|removal| removal.synthesized.iter())
        .map(|edge| edge.id().to_string())
        .collect();
      format!(
        "deleted {} node(s), added [{}]",
        removals.len(),
        synthesized.join(", ")
      )
    }
    Command::Show => String::new(),
  };
  Ok(report)
}
