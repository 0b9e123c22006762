use crate::types::SupportedModel;
use anyhow::Result;
use std::io::{self, Write};

/// List every registered model with its encoding, prices and window
pub fn run_models() -> Result<()> {
    let stdout = io::stdout();
    write!(stdout.lock(), "{}", model_table())?;
    Ok(())
}

fn model_table() -> String {
    let mut output = format!(
        "{:<18} {:<18} {:<12} {:>10} {:>10} {:>8}  {}\n",
        "ID", "NAME", "ENCODING", "IN/1K", "OUT/1K", "MAX", "COUNT"
    );
    for model in SupportedModel::ALL {
        let p = model.profile();
        output.push_str(&format!(
            "{:<18} {:<18} {:<12} {:>10} {:>10} {:>8}  {}\n",
            model.as_str(),
            p.name,
            p.encoding,
            format!("${}", p.input_price),
            format!("${}", p.output_price),
            p.max_tokens,
            if p.supports_native_tokenization { "native" } else { "approx" }
        ));
    }
    output
}
