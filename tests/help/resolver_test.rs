//! Resolution scenarios over realistic command lines.

use pretty_assertions::assert_eq;
use pshelp::help::{HelpKind, HelpRequest, HelpResolver, COMMON_PARAMETERS};
use pshelp::tokenizer::{LineTokenizer, TokenKind, Tokenizer};

fn resolver() -> HelpResolver {
    HelpResolver::new(LineTokenizer::new())
}

/// Offset of the first character of `needle` in `line`, plus `delta`.
fn offset_of(line: &str, needle: &str, delta: i64) -> i64 {
    let byte = line.find(needle).expect("needle in line");
    line[..byte].chars().count() as i64 + delta
}

#[test]
fn test_scenario_command() {
    let request = resolver().resolve("Get-Item -Force", 3).unwrap();
    assert_eq!(request.kind, HelpKind::Command);
    assert_eq!(request.argument(1), Some("Get-Item"));
}

#[test]
fn test_scenario_parameter() {
    let request = resolver().resolve("Get-Item -Force", 11).unwrap();
    assert_eq!(
        request,
        HelpRequest::parameter(Some("Get-Item".to_string()), "FORCE")
    );
}

#[test]
fn test_every_offset_inside_command_names_it() {
    let line = "Get-ChildItem -Path . | Sort-Object -Property Length";
    let tokens = LineTokenizer::new().tokenize(line).tokens;

    for token in tokens.iter().filter(|t| t.kind == TokenKind::Command) {
        // Strictly inside: from the first character to the last.
        for cursor in token.start as i64..token.end as i64 - 1 {
            let request = resolver().resolve(line, cursor).unwrap();
            assert_eq!(request.argument(1), Some(token.content.as_str()));
        }
    }
}

#[test]
fn test_all_common_parameters_ignore_command() {
    for name in COMMON_PARAMETERS {
        let line = format!("Remove-Item foo -{}", name.to_lowercase());
        let cursor = offset_of(&line, " -", 3);
        let request = resolver().resolve(&line, cursor).unwrap();
        assert_eq!(request, HelpRequest::common_parameters(), "{line}");
    }
}

#[test]
fn test_parameter_in_nested_pipeline() {
    let line = "$files = Get-ChildItem | Where-Object { $_.Length -gt 1kb } | Select-Object -Last 3";
    let cursor = offset_of(line, "-Last", 2);
    let request = resolver().resolve(line, cursor).unwrap();
    assert_eq!(
        request.arguments,
        vec![None, Some("Select-Object".to_string()), Some("LAST".to_string())]
    );
}

#[test]
fn test_operator_inside_script_block() {
    let line = "Get-Process | Where-Object { $_.CPU -gt 100 }";
    let cursor = offset_of(line, "-gt", 1);
    let request = resolver().resolve(line, cursor).unwrap();
    assert_eq!(request, HelpRequest::operators());
}

#[test]
fn test_keyword_topics() {
    let cases = [
        ("Foreach ($i in 1..3) { $i }", "Foreach", "about_Foreach"),
        ("if ($x) { 'y' } else { 'n' }", "else", "about_else"),
        ("while ($true) { break }", "break", "about_break"),
    ];
    for (line, keyword, topic) in cases {
        let cursor = offset_of(line, keyword, 1);
        let request = resolver().resolve(line, cursor).unwrap();
        assert_eq!(request.kind, HelpKind::Topic);
        assert_eq!(request.argument(1), Some(topic), "{line}");
    }
}

#[test]
fn test_cursor_past_last_token() {
    let line = "Get-Item -Force";
    let end = line.chars().count() as i64;
    assert!(resolver().resolve(line, end).is_some());
    assert_eq!(resolver().resolve(line, end + 2), None);
}

#[test]
fn test_unicode_line_uses_character_offsets() {
    let line = "Write-Host 'größe' -ForegroundColor Red";
    let cursor = offset_of(line, "-Fore", 3);
    let request = resolver().resolve(line, cursor).unwrap();
    assert_eq!(request.argument(2), Some("FOREGROUNDCOLOR"));
}
