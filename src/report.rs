//! Terminal / JSON rendering of one request.

use colored::Colorize;
use etymology_chain::{
    ChainExtractionResult, EtymologyPath, Outcome, PathError,
    messages::{source_url, unresolved_message},
    path::map_title,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Report {
    source: Option<String>,
    title: Option<String>,
    outcome: Outcome,
    message: String,
    chain: Vec<String>,
    path: Option<EtymologyPath>,
    legend: Option<String>,
    unresolved: Option<String>,
}

impl Report {
    pub fn build(
        word: Option<&str>,
        language: Option<&str>,
        outcome: &Outcome,
        result: Option<&ChainExtractionResult>,
        path: Option<&Result<EtymologyPath, PathError>>,
    ) -> Self {
        let mut message = outcome.message();
        let mut unresolved = None;
        let mut resolved = None;

        match path {
            Some(Ok(p)) => resolved = Some(p.clone()),
            Some(Err(err)) => {
                let PathError::UnresolvedLanguage(name) = err;
                message = unresolved_message(&message, err);
                unresolved = Some(name.clone());
            }
            None => {}
        }

        Self {
            source: word.map(|w| source_url(w, language)),
            title: word.map(map_title),
            outcome: outcome.clone(),
            message,
            chain: result.map(|r| r.chain.as_slice().to_vec()).unwrap_or_default(),
            legend: resolved.as_ref().map(EtymologyPath::legend),
            path: resolved,
            unresolved,
        }
    }

    pub fn print(&self) {
        if let Some(title) = &self.title {
            println!("{}", title.bold());
        }
        if let Some(source) = &self.source {
            println!("{}", source.dimmed());
        }
        println!();

        let message = if self.outcome.is_mappable() && self.unresolved.is_none() {
            self.message.normal()
        } else {
            self.message.yellow()
        };
        println!("{message}");

        if let Some(legend) = &self.legend {
            println!();
            println!("{}", legend.green());
        }

        if let Some(path) = &self.path {
            println!();
            for leg in &path.legs {
                println!(
                    "  {} ({:.2}, {:.2}) -> {} ({:.2}, {:.2})",
                    leg.ancestor.language.cyan(),
                    leg.ancestor.at.lat,
                    leg.ancestor.at.lon,
                    leg.descendant.language.cyan(),
                    leg.descendant.at.lat,
                    leg.descendant.at.lon,
                );
            }
        }
    }
}
