use crate::workflow::{parse_scripted_keys, wizard_action_from_key};

pub fn cmd_keys(args: &[String]) -> Result<String, String> {
    if args.is_empty() {
        return Err("usage: keys <script>".to_string());
    }
    let keys = parse_scripted_keys(&args.join(","))?;
    let lines: Vec<String> = keys
        .into_iter()
        .enumerate()
        .map(|(index, key)| match wizard_action_from_key(key) {
            Some(action) => format!("key.{index}={action}"),
            None => format!("key.{index}=unbound"),
        })
        .collect();
    Ok(lines.join("\n"))
}
