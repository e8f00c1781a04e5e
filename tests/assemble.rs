use std::{fs, path::PathBuf, rc::Rc};

use ariadne::Source;
use hackasm::{
    Assembler, BuildError,
    analyze::{Error, ErrorCode, ErrorKind},
    synthesize::{
        Program,
        out::{Discard, HackFile},
    },
};

const ADD: &str = "
// Computes R0 = 2 + 3  (R0 refers to RAM[0])

@2
D=A
@3
D=D+A
@0
M=D
";

const ADD_HACK: [&str; 6] = [
    "0000000000000010",
    "1110110000010000",
    "0000000000000011",
    "1110000010010000",
    "0000000000000000",
    "1110001100001000",
];

const MAX: &str = "
// Computes R2 = max(R0, R1)

   @R0
   D=M              // D = first number
   @R1
   D=D-M            // D = first number - second number
   @OUTPUT_FIRST
   D;JGT            // if D>0 (first is greater) goto output_first
   @R1
   D=M              // D = second number
   @OUTPUT_D
   0;JMP            // goto output_d
(OUTPUT_FIRST)
   @R0
   D=M              // D = first number
(OUTPUT_D)
   @R2
   M=D              // M[2] = D (greatest number)
(INFINITE_LOOP)
   @INFINITE_LOOP
   0;JMP            // infinite loop
";

const MAX_HACK: [&str; 16] = [
    "0000000000000000",
    "1111110000010000",
    "0000000000000001",
    "1111010011010000",
    "0000000000001010",
    "1110001100000001",
    "0000000000000001",
    "1111110000010000",
    "0000000000001100",
    "1110101010000111",
    "0000000000000000",
    "1111110000010000",
    "0000000000000010",
    "1110001100001000",
    "0000000000001110",
    "1110101010000111",
];

fn program(source: &str) -> Program {
    let assembler: Assembler<Discard> = Assembler::default();
    assembler.assemble_source(source).unwrap()
}

fn assembles(source: &str) -> Vec<String> {
    program(source).words().map(|w| w.to_string()).collect()
}

fn fails(source: &str) -> Error {
    let assembler: Assembler<Discard> = Assembler::default();
    assembler.assemble_source(source).unwrap_err()
}

fn scratch_dir(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hackasm-{}-{}", test_name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn add() {
    assert_eq!(assembles(ADD), ADD_HACK);
}

#[test]
fn max() {
    assert_eq!(assembles(MAX), MAX_HACK);
}

#[test]
fn label_resolves_to_next_instruction() {
    assert_eq!(
        assembles("(LOOP)\n@LOOP\n0;JMP"),
        ["0000000000000000", "1110101010000111"]
    );
}

#[test]
fn forward_reference() {
    // END follows two real instructions, so it binds to pc 2
    assert_eq!(
        assembles("@END\n0;JMP\n(END)"),
        ["0000000000000010", "1110101010000111"]
    );
}

#[test]
fn forward_reference_to_next_instruction() {
    assert_eq!(
        assembles("@END\n(END)\n0;JMP"),
        ["0000000000000001", "1110101010000111"]
    );
}

#[test]
fn variables_start_at_16() {
    assert_eq!(
        assembles("@i\n@sum\n@i\nM=0"),
        [
            "0000000000010000",
            "0000000000010001",
            "0000000000010000",
            "1110101010001000",
        ]
    );
}

#[test]
fn variables_ignore_label_positions() {
    // b is a label declared between the two variables
    assert_eq!(
        assembles("@a\n(b)\n@b\n@c"),
        ["0000000000010000", "0000000000000001", "0000000000010001"]
    );
}

#[test]
fn predefined_symbols() {
    assert_eq!(
        assembles("@SCREEN\n@KBD\n@R15\n@THAT"),
        [
            "0100000000000000",
            "0110000000000000",
            "0000000000001111",
            "0000000000000100",
        ]
    );
}

#[test]
fn duplicate_label_keeps_first() {
    assert_eq!(
        assembles("(A)\n@1\n(A)\n@A"),
        ["0000000000000001", "0000000000000000"]
    );
}

#[test]
fn comments_and_blanks_emit_nothing() {
    assert_eq!(assembles("//full comment\n\n \t \n@5 // five\n"), ["0000000000000101"]);
    assert!(assembles("// nothing here\n\n").is_empty());
    assert!(assembles("").is_empty());
}

#[test]
fn labels_emit_nothing() {
    assert!(assembles("(A)\n(B)").is_empty());
}

#[test]
fn idempotent() {
    assert_eq!(program(MAX).to_text(), program(MAX).to_text());
}

#[test]
fn listing_metadata() {
    let program = program(MAX);

    assert_eq!(program.len(), 16);
    assert_eq!(program.labels, 3);
    assert_eq!(program.variables, 0);

    let jump = &program.emitted[4];
    assert_eq!(jump.pc, 4);
    assert_eq!(jump.line, 8);
    assert_eq!(jump.text, "@OUTPUT_FIRST");
}

#[test]
fn to_text_is_one_line_per_word() {
    let text = program(ADD).to_text();

    assert_eq!(text, format!("{}\n", ADD_HACK.join("\n")));
    assert!(text.lines().all(|line| line.len() == 16));
}

#[test]
fn unknown_mnemonics() {
    let err = fails("@1\nD=Q");
    assert_eq!(err.kind, ErrorKind::UnknownComp("Q".into()));
    assert_eq!(err.line, 2);
    assert_eq!(err.code(), ErrorCode::UnknownMnemonic);
    assert_eq!(err.to_string(), "line 2: unknown computation `Q`");

    assert_eq!(fails("X=M").kind, ErrorKind::UnknownDest("X".into()));
    assert_eq!(fails("0;JXX").kind, ErrorKind::UnknownJump("JXX".into()));
}

#[test]
fn address_out_of_range() {
    let err = fails("@0\n@32768");
    assert_eq!(err.kind, ErrorKind::AddressOutOfRange("32768".into()));
    assert_eq!(err.line, 2);

    assert_eq!(fails("@-5").kind, ErrorKind::AddressOutOfRange("-5".into()));
}

#[test]
fn malformed_instruction() {
    let err = fails("@1\n  D = M = 1  // two assignments\n");
    assert_eq!(err.kind, ErrorKind::MalformedInstruction("D=M=1".into()));
    assert_eq!(err.line, 2);
    assert_eq!(err.range, 5..14);
    assert_eq!(err.code().to_string(), "E01");
}

#[test]
fn label_beyond_address_space() {
    let mut source = "D=A\n".repeat(32768);
    source.push_str("(END)\n@END\n");

    let err = fails(&source);
    assert_eq!(err.kind, ErrorKind::AddressOutOfRange("32768".into()));
    assert_eq!(err.line, 32769);
}

#[test]
fn diagnostic_names_code_and_message() {
    let source = "@1\nD=Q\n";
    let name = Rc::new(String::from("bad.asm"));

    let mut rendered = Vec::new();
    fails(source)
        .report(name.clone())
        .write((name, Source::from(source)), &mut rendered)
        .unwrap();

    let rendered = String::from_utf8(rendered).unwrap();
    assert!(rendered.contains("E03"));
    assert!(rendered.contains("unknown computation"));
    assert!(rendered.contains("bad.asm"));
}

#[test]
fn writes_hack_file() {
    let dir = scratch_dir("writes_hack_file");
    let input = dir.join("Add.asm");
    let output = dir.join("Add.hack");
    fs::write(&input, ADD).unwrap();

    let assembler: Assembler<HackFile> = Assembler::default();
    let program = assembler.assemble(&input, &output).unwrap();

    assert_eq!(program.len(), 6);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        format!("{}\n", ADD_HACK.join("\n"))
    );
    assert!(!dir.join("Add.hack.tmp").exists());

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn failed_assembly_writes_nothing() {
    let dir = scratch_dir("failed_assembly_writes_nothing");
    let input = dir.join("Bad.asm");
    let output = dir.join("Bad.hack");
    fs::write(&input, "@1\nD=Q\n").unwrap();

    let assembler: Assembler<HackFile> = Assembler::default();
    let result = assembler.assemble(&input, &output);

    assert!(matches!(result, Err(BuildError::Assembly(_))));
    assert!(!output.exists());
    assert!(!dir.join("Bad.hack.tmp").exists());

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn missing_input() {
    let dir = scratch_dir("missing_input");

    let assembler: Assembler<HackFile> = Assembler::default();
    let result = assembler.assemble(dir.join("Nope.asm"), dir.join("Nope.hack"));

    assert!(matches!(result, Err(BuildError::Read { .. })));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn unwritable_output() {
    let dir = scratch_dir("unwritable_output");
    let input = dir.join("Add.asm");
    fs::write(&input, ADD).unwrap();

    let assembler: Assembler<HackFile> = Assembler::default();
    let result = assembler.assemble(&input, dir.join("missing").join("Add.hack"));

    assert!(matches!(result, Err(BuildError::Write { .. })));

    fs::remove_dir_all(dir).unwrap();
}
