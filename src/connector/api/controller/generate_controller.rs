use anyhow::Result;

use crate::cli::{OutputFormat, RequestArgs};
use crate::{GenerationRequest, GenerationResult};

use super::super::Container;

pub struct GenerateController<'a> {
    container: &'a Container,
}

impl<'a> GenerateController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn generate(
        &self,
        args: RequestArgs,
        variations: usize,
        format: OutputFormat,
    ) -> Result<String> {
        let request = args.into_request()?;
        let use_case = self.container.generate_use_case();

        if variations <= 1 {
            let result = use_case.execute(&request).await?;
            return Ok(match format {
                OutputFormat::Json => serde_json::to_string_pretty(&result)?,
                OutputFormat::Text => format_progression(&request, &result),
            });
        }

        let results = use_case.execute_many(&request, variations).await?;
        Ok(match format {
            OutputFormat::Json => serde_json::to_string_pretty(&results)?,
            OutputFormat::Text => results
                .iter()
                .enumerate()
                .map(|(i, result)| {
                    format!("Variation {}\n{}", i + 1, format_progression(&request, result))
                })
                .collect::<Vec<_>>()
                .join("\n"),
        })
    }
}

fn format_progression(request: &GenerationRequest, result: &GenerationResult) -> String {
    let mut output = format!(
        "{} {} ({}) at {} BPM\n",
        request.key(),
        request.normalized_scale(),
        request.normalized_genre(),
        result.tempo
    );

    let width = result
        .chords
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);

    for (i, chord) in result.chords.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}. {:<width$}  x{}",
            i + 1,
            chord.name,
            chord.duration,
        ));
        if let Some(notes) = chord.notes() {
            output.push_str(&format!("  [{}]", notes.join(" ")));
        }
        output.push('\n');
    }

    if !result.midi.is_empty() {
        output.push_str(&format!("   ({} MIDI events)\n", result.midi.len()));
    }

    output
}
