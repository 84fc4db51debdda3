use anyhow::{Context, anyhow};
use fsst::SymbolTable;

/// Prints every symbol of a serialized table, one per line.
///
/// Usage: `dump_table <table.bin>`
fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .ok_or(anyhow!("usage: dump_table <table.bin>"))?;
    let bytes = std::fs::read(&path).with_context(|| format!("Failed to read {path}"))?;
    let (table, consumed) = SymbolTable::parse_prefix(&bytes)?;

    eprintln!(
        "{} symbols, zero-terminated: {}, header bytes: {consumed}",
        table.symbol_count(),
        table.is_zero_terminated()
    );
    for (code, symbol) in table.symbols() {
        println!("{code:3} {symbol:?}");
    }

    Ok(())
}
