// Chapter Condensation — Collapse a module graph into a chapter graph
//
// Modules are grouped into chapters by index documents. Each index names a
// chapter title on its first line and lists member modules, one per line:
//
//   Control flow
//   ============
//
//   .. toctree::
//
//      loops
//      branches
//
// Every module edge u -> v becomes the chapter edge chapter(u) -> chapter(v).
// Chapter self-edges are dropped and duplicates collapse. The result is an
// ordinary Graph that can be simplified and rendered like any other.

use crate::graph::Graph;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// One chapter: its name, display title and member modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterIndex {
    pub chapter: String,
    pub title: String,
    pub members: Vec<String>,
}

/// Parse an index document. The first line is the title; every later line
/// made of optional leading spaces and one `[a-z0-9_]+` word is a member.
pub fn parse_index(chapter: impl Into<String>, text: &str) -> ChapterIndex {
    let mut lines = text.lines();
    let title = lines.next().unwrap_or_default().trim().to_string();
    let members = lines
        .map(|line| line.trim_start_matches(' ').trim_end_matches('\r'))
        .filter(|word| is_member_name(word))
        .map(str::to_string)
        .collect();
    ChapterIndex {
        chapter: chapter.into(),
        title,
        members,
    }
}

fn is_member_name(word: &str) -> bool {
    !word.is_empty()
        && word
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

/// Builds a chapter-level graph from a module-level one.
#[derive(Debug, Clone)]
pub struct Condenser {
    name: String,
    titles: BTreeMap<String, String>,
    chapter_of: HashMap<String, String>,
}

impl Condenser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            titles: BTreeMap::new(),
            chapter_of: HashMap::new(),
        }
    }

    /// Register a chapter. A module listed by several chapters belongs to
    /// the one registered last.
    pub fn add_chapter(&mut self, index: ChapterIndex) {
        for member in index.members {
            self.chapter_of.insert(member, index.chapter.clone());
        }
        self.titles.insert(index.chapter, index.title);
    }

    pub fn chapter_of(&self, module: &str) -> Option<&str> {
        self.chapter_of.get(module).map(String::as_str)
    }

    /// Labels for every chapter sorted by chapter name, then the distinct
    /// chapter edges sorted by target and source.
    pub fn condense(&self, modules: &Graph) -> Graph {
        let mut deps: BTreeSet<(&str, &str)> = BTreeSet::new();
        let mut warned = HashSet::new();

        for edge in modules.edges() {
            let Some(target) = self.chapter_of(&edge.to) else {
                continue;
            };
            let Some(source) = self.chapter_of(&edge.from) else {
                if warned.insert(edge.from.as_str()) {
                    tracing::warn!(
                        module = %edge.from,
                        "module referenced in dependencies but not in any chapter"
                    );
                }
                continue;
            };
            if source != target {
                deps.insert((target, source));
            }
        }

        let mut out = Graph::new(self.name.clone());
        for (chapter, title) in &self.titles {
            out.add_label(chapter.clone(), format!("\"{title}\""));
        }
        for (target, source) in deps {
            out.add_edge(source, target);
        }
        tracing::debug!(
            chapters = self.titles.len(),
            edges = out.edges().count(),
            "condensed module graph"
        );
        out
    }
}
