use focusdesk_core::{Config, HttpQuoteSource, Quote};

use crate::common::{open_widget, runtime, CliResult};

fn print_quote(quote: &Quote) {
    println!("{}", quote.text_line());
    println!("{}", quote.author_line());
}

pub fn run() -> CliResult {
    let config = Config::load_or_default();
    let source = HttpQuoteSource::from_config(&config.quote)?;
    let quote = runtime()?.block_on(focusdesk_core::load_quote(&source));
    print_quote(&quote);
    Ok(())
}

pub fn reset_all() -> CliResult {
    let config = Config::load_or_default();
    let source = HttpQuoteSource::from_config(&config.quote)?;
    let mut widget = open_widget(&config)?;
    let quote = runtime()?.block_on(widget.reset_all(&source));
    print_quote(&quote);
    Ok(())
}
