use std::collections::BTreeMap;
use std::thread;

use abp_filters::{
    parse_filter_list, parse_line, FilterType, Header, HidingFilter, Line, LineKind, OptionValue, ParseError,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const SAMPLE_LIST: &str = "\
[Adblock Plus 2.0]
! Version: 201607081234
! Title: Sample list
! Expires: 4 days
! Homepage: https://example.com/
!
! Blocking
||example.com/banner.gif$image,~match-case,domain=abc.com|def.org
@@||example.com/good.gif
/ads/*$script,third-party
&ad_type=
! Hiding
abc.com,cdf.com##div#ad1
#@#div#ad1
abc.com#div(foo)(name=bar)(value=baz)
~example.org##.sponsored > a[href^=\"http\"]

%include https://example.com/other.txt%
";

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[rstest]
#[case("", LineKind::EmptyLine)]
#[case("   \t ", LineKind::EmptyLine)]
#[case("! comment", LineKind::Comment)]
#[case("!", LineKind::Comment)]
#[case("! Checksum: abc", LineKind::Metadata)]
#[case("%include a/b.txt%", LineKind::Include)]
#[case("%include  %", LineKind::Include)]
#[case("[Adblock]", LineKind::Header)]
#[case("||ads.example.com^", LineKind::Filter(FilterType::Blocking))]
#[case("example.com##.ad", LineKind::Filter(FilterType::Hiding))]
#[case("[Adblock", LineKind::Filter(FilterType::Blocking))]
#[case("%include", LineKind::Filter(FilterType::Blocking))]
fn classifies_each_line_once(#[case] text: &str, #[case] kind: LineKind) {
    assert_eq!(parse_line(text).unwrap().kind(), kind);
}

#[rstest]
#[case("[Adblock 1.1]")]
#[case("%bad line%")]
#[case("abc.com#div(foo)(bar)")]
#[case("abc.com#*")]
fn rejects_malformed_lines(#[case] text: &str) {
    let err = parse_line(text).unwrap_err();
    assert_eq!(err.text(), text);
    assert!(!err.is_fatal());
}

#[test]
fn blocking_filter_with_options() {
    let text = "||example.com/banner.gif$image,~match-case,domain=abc.com|def.org";
    let expected = Line::BlockingFilter(abp_filters::BlockingFilter {
        expression: text.to_string(),
        is_exception: false,
        options: BTreeMap::from([
            ("image".to_string(), OptionValue::Flag(true)),
            ("match-case".to_string(), OptionValue::Flag(false)),
            (
                "domain".to_string(),
                OptionValue::List(vec!["abc.com".to_string(), "def.org".to_string()]),
            ),
        ]),
        pattern: "||example.com/banner.gif".to_string(),
    });
    assert_eq!(parse_line(text).unwrap(), expected);
}

#[test]
fn blocking_exception() {
    match parse_line("@@||example.com/good.gif").unwrap() {
        Line::BlockingFilter(filter) => {
            assert!(filter.is_exception);
            assert_eq!(filter.pattern, "||example.com/good.gif");
            assert!(filter.options.is_empty());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn match_case_negation() {
    let options = |text: &str| match parse_line(text).unwrap() {
        Line::BlockingFilter(filter) => filter.options,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(options("ads$~match-case")["match-case"], OptionValue::Flag(false));
    assert_eq!(options("ads$match-case")["match-case"], OptionValue::Flag(true));
}

#[test]
fn hiding_filters() {
    assert_eq!(
        parse_line("abc.com,cdf.com##div#ad1").unwrap(),
        Line::HidingFilter(HidingFilter {
            expression: "abc.com,cdf.com##div#ad1".to_string(),
            is_exception: false,
            selector: "div#ad1".to_string(),
            domains: vec!["abc.com".to_string(), "cdf.com".to_string()],
        })
    );
    assert_eq!(
        parse_line("#@#div#ad1").unwrap(),
        Line::HidingFilter(HidingFilter {
            expression: "#@#div#ad1".to_string(),
            is_exception: true,
            selector: "div#ad1".to_string(),
            domains: vec![],
        })
    );
    match parse_line("abc.com#div(foo)(name=bar)(value=baz)").unwrap() {
        Line::HidingFilter(filter) => assert_eq!(
            filter.selector,
            "div.foo[name=\"bar\"][value=\"baz\"],div#foo[name=\"bar\"][value=\"baz\"]"
        ),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn legacy_errors() {
    assert!(matches!(
        parse_line("abc.com#div(foo)(bar)"),
        Err(ParseError::DuplicateIdentifier { .. })
    ));
    assert!(matches!(parse_line("abc.com#*"), Err(ParseError::MatchesEverything { .. })));
}

#[test]
fn headers() {
    assert_eq!(
        parse_line("[Adblock Plus 1.1]").unwrap(),
        Line::Header(Header {
            version: "Adblock Plus 1.1".to_string()
        })
    );
    assert!(matches!(
        parse_line("[Adblock 1.1]"),
        Err(ParseError::MalformedHeader { .. })
    ));
}

#[test]
fn failure_does_not_block_following_lines() {
    let mut list = parse_filter_list(["! good line", "%bad line%", "! next line"]);
    assert_eq!(list.next().unwrap().unwrap().kind(), LineKind::Comment);
    assert!(matches!(
        list.next().unwrap(),
        Err(ParseError::UnrecognizedInstruction { .. })
    ));
    assert_eq!(list.next().unwrap().unwrap().kind(), LineKind::Comment);
    assert!(list.next().is_none());
}

#[test]
fn sample_list_round_trips() {
    let mut count = 0;
    for (line, text) in parse_filter_list(SAMPLE_LIST.lines()).zip(SAMPLE_LIST.lines()) {
        let line = line.unwrap();
        assert_eq!(strip_whitespace(&line.render()), strip_whitespace(text), "{text}");
        count += 1;
    }
    assert_eq!(count, SAMPLE_LIST.lines().count());
}

#[test]
fn sample_list_kinds() {
    let kinds: Vec<&str> = parse_filter_list(SAMPLE_LIST.lines())
        .map(|line| line.unwrap().kind().as_str())
        .collect();
    assert_eq!(kinds.iter().filter(|kind| **kind == "metadata").count(), 4);
    assert_eq!(kinds.iter().filter(|kind| **kind == "filter").count(), 8);
    assert_eq!(kinds.first(), Some(&"header"));
    assert_eq!(kinds.last(), Some(&"include"));
}

#[test]
fn parses_independent_lists_in_parallel() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let lines: Vec<String> = (0..100)
                    .map(|n| format!("||ads{i}-{n}.example.com^$script,domain=site{n}.com"))
                    .collect();
                parse_filter_list(lines)
                    .map(|line| line.map(|line| line.is_filter()))
                    .collect::<Result<Vec<_>, _>>()
            })
        })
        .collect();

    for handle in handles {
        let results = handle.join().unwrap().unwrap();
        assert_eq!(results.len(), 100);
        assert!(results.into_iter().all(|is_filter| is_filter));
    }
}
