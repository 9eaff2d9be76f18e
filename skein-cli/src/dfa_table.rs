//! Pretty-printing `Dfa<char>` as a table, the way `dandy::dfa::Dfa::to_table`
//! does — rows are states, columns are alphabet symbols, `->` marks the
//! initial state and `*` marks finals. This is CLI-layer presentation only:
//! `skein`'s core has no file format of its own (spec.md §6), so this table
//! is a convenience for reading output at a terminal, not a serialization
//! format other tools round-trip through.
use crate::table::Table;
use skein::Dfa;

pub fn render(dfa: &Dfa<char>) -> String {
    let alphabet: Vec<char> = dfa.alphabet().into_iter().collect();

    let mut table = Table::default();
    let mut header = vec![String::new(), String::new(), String::new()];
    header.extend(alphabet.iter().map(|c| c.to_string()));
    table.push_row(header);

    for state in 0..dfa.state_count() {
        let mut row = vec![
            if state == dfa.initial_state() { "->".to_string() } else { String::new() },
            if dfa.is_final(state) { "*".to_string() } else { String::new() },
            format!("s{state}"),
        ];
        for sym in &alphabet {
            row.push(match dfa.step(state, sym) {
                Some(target) => format!("s{target}"),
                None => "-".to_string(),
            });
        }
        table.push_row(row);
    }

    table.render(" ")
}
