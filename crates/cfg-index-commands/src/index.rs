use std::{io, io::Write as _};

use anstream::stream::{AsLockedWrite, RawStream};
use anstyle::{AnsiColor, Color, Style};
use cfg_index::{ConfigIndex, index::Entry, node::Node};

use crate::Printer;

const SECTION: Style = Style::new().bold();
const PATH: Style = Style::new().bold();
const KIND: Style = Style::new().dimmed();
const NULL: Style = Style::new().bold();
const BOOL: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
const NUMBER: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
const STRING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));
const OBJECT_KEY: Style = Style::new().bold();
const UNSUPPORTED: Style = Style::new()
    .bold()
    .bg_color(Some(Color::Ansi(AnsiColor::Red)))
    .fg_color(None);

impl<W: RawStream + AsLockedWrite> Printer<W> {
    /// Prints all entries in the provided `index` sorted by path. Entries can be filtered by path
    /// with the supplied predicate.
    ///
    /// Scalars are printed as is, and mappings are printed in full. Since sequences and structures
    /// are recursively indexed, only their summary is printed.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors.
    pub fn print_index(
        self,
        index: &ConfigIndex,
        mut filter: impl FnMut(&str) -> bool,
    ) -> io::Result<()> {
        let mut writer = self.writer;
        if index.is_empty() {
            writeln!(&mut writer, "index is empty")?;
            return Ok(());
        }

        writeln!(&mut writer, "{SECTION}Index entries:{SECTION:#}")?;
        for (path, entry) in index.iter() {
            if filter(path) {
                write_entry(&mut writer, path, entry)?;
            }
        }
        Ok(())
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn write_entry(writer: &mut impl io::Write, path: &str, entry: Entry<'_>) -> io::Result<()> {
    let path = if path.is_empty() { "(root)" } else { path };
    let kind = entry.kind();
    write!(writer, "{PATH}{path}{PATH:#} {KIND}[{kind}]{KIND:#} = ")?;

    match entry {
        Entry::Bool(val) => write!(writer, "{BOOL}{val:?}{BOOL:#}")?,
        Entry::Integer(val) => write!(writer, "{NUMBER}{val}{NUMBER:#}")?,
        Entry::Float(val) => write!(writer, "{NUMBER}{val:?}{NUMBER:#}")?,
        Entry::String(val) => write!(writer, "{STRING}{val:?}{STRING:#}")?,
        Entry::Mapping(node) => write_node(writer, node, 0)?,
        Entry::Sequence(node) => {
            let len = match node {
                Node::Sequence(items) => items.len(),
                _ => 0,
            };
            write!(writer, "[{}]", plural(len, "item"))?;
        }
        Entry::Structure(node) => {
            if let Some(structure) = node.as_structure() {
                let type_name = structure.type_name();
                let fields = plural(structure.fields().len(), "field");
                write!(writer, "{type_name} {{ {fields} }}")?;
            } else {
                write_node(writer, node, 0)?;
            }
        }
    }
    writeln!(writer)
}

fn write_node(writer: &mut impl io::Write, node: &Node, ident: usize) -> io::Result<()> {
    match node {
        Node::Null | Node::Optional(None) => write!(writer, "{NULL}null{NULL:#}"),
        Node::Bool(val) => write!(writer, "{BOOL}{val:?}{BOOL:#}"),
        Node::Integer(val) => write!(writer, "{NUMBER}{val}{NUMBER:#}"),
        Node::Float(val) => write!(writer, "{NUMBER}{val:?}{NUMBER:#}"),
        Node::String(val) => write!(writer, "{STRING}{val:?}{STRING:#}"),
        Node::Sequence(items) => {
            writeln!(writer, "[")?;
            for item in items {
                write!(writer, "{:ident$}  ", "")?;
                write_node(writer, item, ident + 2)?;
                writeln!(writer, ",")?;
            }
            write!(writer, "{:ident$}]", "")
        }
        Node::Mapping(entries) => {
            let entries = entries.iter().map(|(key, value)| (key.as_str(), value));
            write_object(writer, entries, ident)
        }
        Node::Structure(structure) => {
            let fields = structure
                .fields()
                .iter()
                .map(|field| (field.name(), field.value()));
            write_object(writer, fields, ident)
        }
        Node::Optional(Some(inner)) => write_node(writer, inner, ident),
        Node::Unsupported(kind) => write!(writer, "{UNSUPPORTED}<unsupported: {kind}>{UNSUPPORTED:#}"),
    }
}

fn write_object<'a>(
    writer: &mut impl io::Write,
    entries: impl Iterator<Item = (&'a str, &'a Node)>,
    ident: usize,
) -> io::Result<()> {
    writeln!(writer, "{{")?;
    for (key, value) in entries {
        write!(writer, "{:ident$}  {OBJECT_KEY}{key:?}{OBJECT_KEY:#}: ", "")?;
        write_node(writer, value, ident + 2)?;
        writeln!(writer, ",")?;
    }
    write!(writer, "{:ident$}}}", "")
}
