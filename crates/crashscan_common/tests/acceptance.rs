//! Acceptance tests for xv6 console analysis
//!
//! Realistic xv6-riscv console captures run through the full
//! registry -> reporter -> report path.

use crashscan_common::{Category, Reporter, ScanConfig, SignatureKind, TargetRegistry};

fn xv6() -> Reporter {
    let registry = TargetRegistry::with_builtin().expect("builtin registry");
    Reporter::from_config(&registry, &ScanConfig::default()).expect("xv6 reporter")
}

#[test]
fn acceptance_panic_example() {
    let input = b"foo\npanic: out of memory\nbar\n";
    let report = xv6().parse(input);

    assert_eq!(report.title, "XV6 kernel panic: out of memory");
    assert_eq!(report.category, Category::KernelPanic);

    let body = report.body_text();
    assert!(body.contains("foo"));
    assert!(body.contains(">>> panic: out of memory <<<"));
    assert!(body.contains("bar"));
}

#[test]
fn acceptance_assertion_example() {
    let report = xv6().parse(b"assertion failed: x > 0\n");
    assert!(report.title.contains("x > 0"), "title: {}", report.title);
    assert_eq!(report.category, Category::AssertionFailure);
}

#[test]
fn acceptance_clean_example() {
    let reporter = xv6();
    let report = reporter.parse(b"hello world\n");
    assert_eq!(report.title, "");
    assert_eq!(report.category, Category::Unknown);
    assert_eq!(
        report.relevant_files,
        vec![
            "kernel/main.c",
            "kernel/vm.c",
            "kernel/proc.c",
            "kernel/syscall.c",
            "kernel/trap.c",
            "kernel/fs.c",
            "kernel/bio.c",
            "kernel/sleeplock.c",
            "kernel/spinlock.c",
        ]
    );
    assert!(!reporter.contains_crash(b"hello world\n"));
}

#[test]
fn acceptance_suspicious_example() {
    let input = b"warning: something odd\n";
    let report = xv6().parse(input);
    assert!(!report.title.is_empty());
    assert_eq!(report.body, input.to_vec());
    assert_eq!(report.start_pos, 0);
    assert_eq!(report.end_pos, input.len());
    assert_eq!(report.kind, None);
}

#[test]
fn acceptance_real_xv6_boot_then_panic() {
    let input = b"\nxv6 kernel is booting\n\nhart 2 starting\nhart 1 starting\ninit: starting sh\n$ usertests\nusertests starting\ntest copyin: OK\npanic: acquire\n";
    let reporter = xv6();
    assert!(reporter.contains_crash(input));

    let report = reporter.parse(input);
    assert_eq!(report.title, "XV6 kernel panic: acquire");
    assert_eq!(report.kind, Some(SignatureKind::Panic));
    assert_eq!(&input[report.start_pos..report.start_pos + 14], b"panic: acquire");
}

#[test]
fn acceptance_segfault_goes_to_memory_files() {
    let report = xv6().parse(b"segmentation fault: pid 4 va 0x0\n");
    assert_eq!(report.category, Category::MemoryError);
    assert_eq!(report.title, "XV6 segmentation fault: pid 4 va 0x0");
}

#[test]
fn acceptance_page_fault_files() {
    let report = xv6().parse(b"page fault: va=0x0000000000001000\n");
    assert_eq!(report.relevant_files, vec!["kernel/vm.c", "kernel/kalloc.c"]);
}

#[test]
fn acceptance_deadlock_and_overflow_have_titles() {
    let reporter = xv6();

    let report = reporter.parse(b"lockdep: deadlock detected\n");
    assert_eq!(report.title, "XV6 deadlock detected");
    assert_eq!(report.category, Category::Deadlock);

    let report = reporter.parse(b"kstack: stack overflow\n");
    assert_eq!(report.title, "XV6 stack overflow");
    assert_eq!(report.category, Category::StackError);
}

#[test]
fn acceptance_backtrace() {
    let input = b"scause 0x000000000000000d\nbacktrace:\n0x0000000080002a3c\n0x00000000800021e6\n0x0000000080001f10\n$ ";
    let report = xv6().parse(input);

    assert_eq!(report.title, "XV6 stack trace");
    assert_eq!(report.category, Category::StackError);
    assert_eq!(report.frames.len(), 3);
    assert_eq!(report.frames[0].address, Some(0x80002a3c));
    assert_eq!(
        &input[report.start_pos..report.end_pos],
        report.body.as_slice()
    );
}

#[test]
fn acceptance_earlier_marker_line_wins() {
    // first matching line wins even if a higher tier appears later
    let input = b"backtrace:\n0x80002a3c\npanic: later\n";
    let report = xv6().parse(input);
    assert_eq!(report.kind, Some(SignatureKind::StackMarker));
}

#[test]
fn acceptance_empty_input() {
    let reporter = xv6();
    let report = reporter.parse(b"");
    assert!(!report.has_crash());
    assert_eq!((report.start_pos, report.end_pos), (0, 0));
    assert!(!reporter.contains_crash(b""));
}
