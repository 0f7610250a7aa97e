//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use termtree::Tree;

use crate::domain::{FamilyTree, PersonId};
use crate::engine::{Adjustment, EstateDivision, ShareKind};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

fn name_of(tree: &FamilyTree, id: PersonId) -> String {
    tree.person(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "?".to_string())
}

/// Print the share table for a division.
pub fn print_division(tree: &FamilyTree, division: &EstateDivision) {
    let deceased = tree
        .deceased()
        .map(|id| name_of(tree, id))
        .unwrap_or_else(|| "?".to_string());
    header(&format!("Estate of {}", deceased));

    let width = division
        .entries()
        .iter()
        .map(|e| name_of(tree, e.person).len())
        .max()
        .unwrap_or(0);

    for entry in division.entries() {
        let kind = match entry.kind {
            ShareKind::Fixed => "fixed",
            ShareKind::Residual => "residual",
        };
        println!(
            "  {:width$}  {:>8}  {} ({})",
            name_of(tree, entry.person),
            entry.fraction.to_string().bold(),
            entry.category,
            kind,
            width = width,
        );
    }

    match division.adjustment() {
        Some(Adjustment::ProportionalReduction) => {
            println!("  {}", "shares reduced proportionally (ʿawl)".yellow());
        }
        Some(Adjustment::ResidualRedistribution) => {
            println!("  {}", "remainder redistributed (radd)".yellow());
        }
        None => {}
    }
}

/// Render the family tree around the deceased with termtree.
///
/// Ancestors hang under the parent branches, descendants under the child
/// branches; spouses and declared siblings are leaves.
pub fn render_tree(tree: &FamilyTree) -> Option<Tree<String>> {
    let deceased = tree.deceased()?;
    let mut root = Tree::new(format!("{} (deceased)", name_of(tree, deceased)));

    for &spouse in tree.spouses_of(deceased) {
        root.push(Tree::new(format!("spouse: {}", name_of(tree, spouse))));
    }
    if let Some(father) = tree.father_of(deceased) {
        root.push(ancestor_branch(tree, father, "father"));
    }
    if let Some(mother) = tree.mother_of(deceased) {
        root.push(ancestor_branch(tree, mother, "mother"));
    }
    for (sibling, kind) in tree.siblings_of(deceased) {
        root.push(Tree::new(format!(
            "{} sibling: {}",
            kind,
            name_of(tree, sibling)
        )));
    }
    for &child in tree.children_of(deceased) {
        root.push(descendant_branch(tree, child));
    }
    Some(root)
}

fn ancestor_branch(tree: &FamilyTree, person: PersonId, role: &str) -> Tree<String> {
    let mut branch = Tree::new(format!("{}: {}", role, name_of(tree, person)));
    if let Some(father) = tree.father_of(person) {
        branch.push(ancestor_branch(tree, father, "father"));
    }
    if let Some(mother) = tree.mother_of(person) {
        branch.push(ancestor_branch(tree, mother, "mother"));
    }
    branch
}

fn descendant_branch(tree: &FamilyTree, person: PersonId) -> Tree<String> {
    let mut branch = Tree::new(name_of(tree, person));
    for &child in tree.children_of(person) {
        branch.push(descendant_branch(tree, child));
    }
    branch
}
