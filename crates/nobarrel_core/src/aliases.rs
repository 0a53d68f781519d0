use log::{debug, trace, warn};
use path_clean::clean;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// One `compilerOptions.paths` entry with the trailing `*` removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub prefix: String,
    /// `true` when the key ended in `*` and matches by prefix.
    pub wildcard: bool,
    pub targets: Vec<PathBuf>,
}

/// Import path aliases, ordered longest prefix first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    pub fn new(mut entries: Vec<AliasEntry>) -> Self {
        // stable sort keeps config order for equal-length prefixes
        entries.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Every candidate base path for `request`, in lookup order.
    pub fn candidates(&self, request: &str) -> Vec<PathBuf> {
        let mut out = Vec::new();
        for entry in &self.entries {
            let rest = if entry.wildcard {
                match request.strip_prefix(entry.prefix.as_str()) {
                    Some(rest) => rest,
                    None => continue,
                }
            } else if request == entry.prefix {
                ""
            } else {
                continue;
            };
            trace!("Matched alias '{}' for request '{}'", entry.prefix, request);
            for target in &entry.targets {
                out.push(if rest.is_empty() { target.clone() } else { target.join(rest) });
            }
        }
        out
    }

    /// First candidate base path for `request`, without touching the disk.
    pub fn resolve(&self, request: &str) -> Option<PathBuf> {
        self.candidates(request).into_iter().next()
    }

    /// Shortest aliased specifier that reaches `target` (extension already
    /// stripped). Only wildcard aliases with a non-empty prefix qualify, so
    /// the result is never a bare package-like specifier.
    pub fn shortest_alias_for(&self, target: &Path) -> Option<String> {
        let mut best: Option<String> = None;
        for entry in self.entries.iter().filter(|e| e.wildcard && !e.prefix.is_empty()) {
            for base in &entry.targets {
                let Ok(rest) = target.strip_prefix(base) else {
                    continue;
                };
                let rest = rest
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/");
                if rest.is_empty() {
                    continue;
                }
                let candidate = if entry.prefix.ends_with('/') {
                    format!("{}{}", entry.prefix, rest)
                } else {
                    format!("{}/{}", entry.prefix, rest)
                };
                if best.as_ref().is_none_or(|b| candidate.len() < b.len()) {
                    best = Some(candidate);
                }
            }
        }
        best
    }
}

/// Loads `compilerOptions.paths` from a tsconfig/jsconfig file. A missing or
/// unparsable file yields an empty table and a single warning.
pub fn load_aliases(config_path: &Path) -> AliasTable {
    debug!("Reading alias config from: {:?}", config_path);
    match read_aliases(config_path) {
        Some(table) => {
            debug!("Loaded {} path aliases", table.len());
            table
        }
        None => {
            warn!("Could not load or parse alias config at {}", config_path.display());
            AliasTable::default()
        }
    }
}

fn read_aliases(config_path: &Path) -> Option<AliasTable> {
    let content = fs::read_to_string(config_path).ok()?;
    let json: serde_json::Value = serde_json::from_str(&strip_jsonc(&content)).ok()?;

    let config_dir = config_path.parent().unwrap_or(Path::new("."));
    let Some(compiler_options) = json.get("compilerOptions") else {
        return Some(AliasTable::default());
    };
    let base_url = compiler_options.get("baseUrl").and_then(|b| b.as_str()).unwrap_or(".");
    let base_path = PathBuf::from(clean(config_dir.join(base_url)));

    let Some(paths_obj) = compiler_options.get("paths").and_then(|p| p.as_object()) else {
        return Some(AliasTable::default());
    };

    let mut entries = Vec::new();
    for (alias, targets) in paths_obj {
        let Some(target_arr) = targets.as_array() else {
            continue;
        };
        let resolved_targets: Vec<PathBuf> = target_arr
            .iter()
            .filter_map(|t| t.as_str())
            .map(|t| PathBuf::from(clean(base_path.join(t.trim_end_matches('*')))))
            .collect();
        if resolved_targets.is_empty() {
            continue;
        }
        let wildcard = alias.ends_with('*');
        let prefix = alias.trim_end_matches('*').to_string();
        trace!("Found path alias: '{}' -> {:?}", prefix, resolved_targets);
        entries.push(AliasEntry { prefix, wildcard, targets: resolved_targets });
    }
    Some(AliasTable::new(entries))
}

/// Removes `//` and `/* */` comments and trailing commas outside of strings.
fn strip_jsonc(input: &str) -> String {
    strip_trailing_commas(&strip_comments(input))
}

fn strip_comments(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    let mut in_string = false;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' && i + 1 < chars.len() {
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            in_string = c != '"';
            i += 1;
            continue;
        }
        match (c, chars.get(i + 1)) {
            ('/', Some('/')) => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            ('/', Some('*')) => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i += 2;
            }
            _ => {
                in_string = c == '"';
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            in_string = escaped || c != '"';
            escaped = !escaped && c == '\\';
        } else if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }
        out.push(c);
    }
    out
}
