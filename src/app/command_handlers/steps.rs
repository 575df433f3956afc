use crate::workflow::ALL_WORKFLOW_STEPS;

pub fn cmd_steps() -> Result<String, String> {
    let lines: Vec<String> = ALL_WORKFLOW_STEPS
        .into_iter()
        .map(|step| {
            format!(
                "step.{}={} title=\"{}\" section={}",
                step.index(),
                step.as_str(),
                step.title(),
                step.section_id()
            )
        })
        .collect();
    Ok(lines.join("\n"))
}
