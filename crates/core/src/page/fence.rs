//! Fenced script block extraction from page text.

/// Extract the bodies of all fenced code blocks tagged exactly `fence_tag`.
///
/// A block opens with a line starting with three backticks immediately
/// followed by the tag, and closes with a line holding three backticks alone;
/// trailing whitespace is tolerated on both delimiter lines. The tag match is
/// case-sensitive and whole: a fence tagged `lua` or `slate-lua-extra` does
/// not match the tag `slate-lua`.
///
/// Bodies are captured verbatim, delimiters excluded, and concatenated in
/// document order with a single newline between blocks. Returns an empty
/// string when no block matches. An opening fence with no closing fence is
/// ignored.
pub fn extract_fenced_code(document_text: &str, fence_tag: &str) -> String {
    let mut bodies: Vec<String> = Vec::new();
    let mut open_block: Option<Vec<&str>> = None;

    for line in document_text.lines() {
        match open_block.as_mut() {
            Some(body) => {
                if is_closing_fence(line) {
                    bodies.push(body.join("\n"));
                    open_block = None;
                } else {
                    body.push(line);
                }
            }
            None => {
                if opening_fence_tag(line) == Some(fence_tag) {
                    open_block = Some(Vec::new());
                }
            }
        }
    }

    // A block left open at end of input never reached a closing fence and is
    // dropped here with `open_block`.
    bodies.join("\n")
}

fn opening_fence_tag(line: &str) -> Option<&str> {
    let tag = line.strip_prefix("```")?.trim_end();
    if tag.is_empty() { None } else { Some(tag) }
}

fn is_closing_fence(line: &str) -> bool {
    line.trim_end() == "```"
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TAG: &str = "slate-lua";

    #[test]
    fn single_block() {
        let text = "Hello\n\n```slate-lua\ntest()\n```\nMore";
        assert_eq!(extract_fenced_code(text, TAG), "test()");
    }

    #[test]
    fn two_blocks_join_with_single_newline() {
        let text = "Hello\n\n```slate-lua\ntest()\n```\nMore\n\n```slate-lua\ntest2()\n```";
        assert_eq!(extract_fenced_code(text, TAG), "test()\ntest2()");
    }

    #[test]
    fn multiline_body_kept_verbatim() {
        let text = "```slate-lua\nlocal x = 1\n\nconfig.set('a', x)\n```";
        assert_eq!(
            extract_fenced_code(text, TAG),
            "local x = 1\n\nconfig.set('a', x)"
        );
    }

    #[rstest]
    #[case("```lua\ntest()\n```")]
    #[case("```slate\ntest()\n```")]
    #[case("```slate-lua-extra\ntest()\n```")]
    #[case("```Slate-Lua\ntest()\n```")]
    #[case("plain text without any fence")]
    #[case("")]
    fn non_matching_tags_yield_empty(#[case] text: &str) {
        assert_eq!(extract_fenced_code(text, TAG), "");
    }

    #[test]
    fn trailing_whitespace_on_delimiters_is_tolerated() {
        let text = "```slate-lua  \ntest()\n```  \n";
        assert_eq!(extract_fenced_code(text, TAG), "test()");
    }

    #[test]
    fn indented_fence_does_not_open() {
        let text = "  ```slate-lua\ntest()\n```";
        assert_eq!(extract_fenced_code(text, TAG), "");
    }

    #[test]
    fn unterminated_block_is_ignored() {
        let text = "```slate-lua\ntest()\nno closing fence here";
        assert_eq!(extract_fenced_code(text, TAG), "");
    }

    #[test]
    fn unterminated_block_does_not_eat_earlier_blocks() {
        let text = "```slate-lua\nfirst()\n```\n\n```slate-lua\ndangling()";
        assert_eq!(extract_fenced_code(text, TAG), "first()");
    }

    #[test]
    fn other_fences_between_matching_blocks_are_skipped() {
        let text = "```lua\nignored()\n```\n```slate-lua\nkept()\n```";
        assert_eq!(extract_fenced_code(text, TAG), "kept()");
    }

    #[test]
    fn empty_body_block() {
        let text = "```slate-lua\n```";
        assert_eq!(extract_fenced_code(text, TAG), "");
    }

    #[test]
    fn crlf_input_is_handled() {
        let text = "```slate-lua\r\ntest()\r\n```\r\n";
        assert_eq!(extract_fenced_code(text, TAG), "test()");
    }
}
