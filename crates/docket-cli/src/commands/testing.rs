//! Shared source and symbol dump for command tests.

use std::path::PathBuf;

const SOURCE: &str = "package com.acme;

/**
 * Keeps the ledger.
 * @author Ada
 */
public class Ledger {
    /** Entry count. */
    private int count;

    /**
     * Records an amount.
     * @param amount value in cents
     */
    public void record(long amount) {
        count++;
    }
}
";

const SYMBOLS: &str = r#"[
  {
    "name": "Ledger",
    "kind": 5,
    "range": { "start": { "line": 6, "character": 0 }, "end": { "line": 17, "character": 1 } },
    "selectionRange": { "start": { "line": 6, "character": 13 }, "end": { "line": 6, "character": 19 } },
    "children": [
      {
        "name": "count",
        "kind": 8,
        "range": { "start": { "line": 8, "character": 4 }, "end": { "line": 8, "character": 22 } },
        "selectionRange": { "start": { "line": 8, "character": 16 }, "end": { "line": 8, "character": 21 } }
      },
      {
        "name": "record(long) : void",
        "kind": 6,
        "range": { "start": { "line": 10, "character": 4 }, "end": { "line": 16, "character": 5 } },
        "selectionRange": { "start": { "line": 14, "character": 16 }, "end": { "line": 14, "character": 22 } }
      }
    ]
  }
]"#;

/// Write `Ledger.java` and, when `symbols` is set, its dump into `dir`.
pub fn ledger(dir: &tempfile::TempDir, symbols: bool) -> (PathBuf, Option<PathBuf>) {
    let file = dir.path().join("Ledger.java");
    std::fs::write(&file, SOURCE).expect("source should write");
    let dump = symbols.then(|| {
        let path = dir.path().join("Ledger.symbols.json");
        std::fs::write(&path, SYMBOLS).expect("symbols should write");
        path
    });
    (file, dump)
}
