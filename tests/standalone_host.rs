use search_immediate::host::{load_binary, ReportSink, StandaloneView};
use search_immediate::{lookup_for_immediate, BinaryView, MatchPolicy, TokenKind};

#[inline(never)]
#[no_mangle]
pub extern "C" fn search_immediate_marker(x: u32) -> u32 {
    x.wrapping_mul(0x1234_5678) ^ 0x0bad_cafe
}

// The test binary itself is the most convenient real object file at hand.
#[test]
#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
fn indexes_and_searches_own_executable() {
    let exe = std::env::current_exe().unwrap();
    assert_eq!(std::hint::black_box(search_immediate_marker)(0), 0x0bad_cafe);

    let dir = tempfile::tempdir().unwrap();
    let html_path = dir.path().join("report.html");
    let view = StandaloneView::open(
        &exe,
        ReportSink {
            html_path: Some(html_path.clone()),
            ..ReportSink::default()
        },
    )
    .unwrap();
    assert!(!view.functions().is_empty());

    let marker = view
        .functions()
        .iter()
        .find(|f| f.name == "search_immediate_marker")
        .expect("marker function indexed");
    assert!(!marker.instructions.is_empty());
    assert_eq!(marker.instructions[0].address, marker.start);

    let results = lookup_for_immediate(&view, 0x0bad_cafe, MatchPolicy::Immediates);
    assert!(results
        .iter()
        .any(|r| r.function == "search_immediate_marker" && r.instruction.contains("0xbadcafe")));

    // Direct call targets land inside .text
    let has_address_operand = view
        .binary()
        .functions
        .iter()
        .flat_map(|f| &f.instructions)
        .flat_map(|i| &i.tokens)
        .any(|t| t.kind == TokenKind::PossibleAddress);
    assert!(has_address_operand);
    assert!(!view.binary().sections.is_empty());

    view.show_html_report("Search immediate - 0xBADCAFE", "<html></html>", "")
        .unwrap();
    assert!(html_path.exists());
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_binary(std::path::Path::new("/nonexistent/search-immediate.bin"))
        .err()
        .expect("missing file");
    assert!(matches!(err, search_immediate::Error::Io(_)));
}
