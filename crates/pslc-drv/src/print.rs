//! A minimal indented dump of a checked program's declaration tree.
//!
//! Purely diagnostic: there is no parser for this output, and its exact
//! formatting is not part of any contract other callers depend on.

use std::fmt::Write as _;

use pslc_par::ast::*;
use pslc_util::Interner;

pub fn program_tree(program: &Program, interner: &Interner) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Program {}", interner.resolve(program.name));
    write_block(&mut out, &program.block, interner, 1);
    out.trim_end().to_string()
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_block(out: &mut String, block: &Block, interner: &Interner, depth: usize) {
    for decl in &block.consts {
        indent(out, depth);
        let _ = writeln!(out, "Const {}", interner.resolve(decl.name));
    }
    for decl in &block.types {
        indent(out, depth);
        let _ = writeln!(out, "Type {}", interner.resolve(decl.name));
    }
    for decl in &block.vars {
        for name in &decl.names {
            indent(out, depth);
            let _ = writeln!(out, "Var {}", interner.resolve(*name));
        }
    }
    for sub in &block.subprograms {
        indent(out, depth);
        let name = interner.resolve(sub.name);
        match sub.kind {
            SubprogramKind::Function => {
                let _ = writeln!(out, "Function {name}");
            }
            SubprogramKind::Procedure => {
                let _ = writeln!(out, "Procedure {name}");
            }
        }
        write_block(out, &sub.block, interner, depth + 1);
    }
    indent(out, depth);
    let _ = writeln!(out, "Body ({} statement(s))", block.body.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pslc_par::Parser;

    #[test]
    fn resolves_declared_names_instead_of_raw_symbols() {
        let mut interner = Interner::new();
        let program = Parser::new(
            "PROGRAM P; CONST N = 1; VAR X: INTEGER; BEGIN END.",
            &mut interner,
        )
        .unwrap()
        .parse_program()
        .unwrap();

        let tree = program_tree(&program, &interner);
        assert!(tree.contains("Program P"));
        assert!(tree.contains("Const N"));
        assert!(tree.contains("Var X"));
    }
}
