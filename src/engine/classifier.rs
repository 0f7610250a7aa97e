//! Heir classification: from tree to heir categories.
//!
//! The classifier walks outward from the deceased, building for every
//! relative a lineage (the path of primitive relationship steps), then
//! deduces the heir category by folding the lineage through an explicit
//! transition table. Relatives reachable by several paths are classified by
//! the strongest relation only; dead relatives are not classified but still
//! route lineages (a dead father links the paternal grandfather and the
//! uncles).

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use tracing::instrument;

use crate::domain::{FamilyTree, HeirCategory, PersonId, RelationStep, Sex, SiblingKind};

use super::error::{EngineError, EngineResult};

/// Output of the classification stage: every alive relative mapped to
/// exactly one category. Iteration order follows arena insertion order, so
/// classification is deterministic per tree snapshot.
#[derive(Debug, Clone)]
pub struct Classification {
    entries: Vec<(PersonId, HeirCategory)>,
    by_category: BTreeMap<HeirCategory, Vec<PersonId>>,
}

impl Classification {
    pub fn entries(&self) -> &[(PersonId, HeirCategory)] {
        &self.entries
    }

    pub fn by_category(&self) -> &BTreeMap<HeirCategory, Vec<PersonId>> {
        &self.by_category
    }

    pub fn category_of(&self, person: PersonId) -> Option<HeirCategory> {
        self.entries
            .iter()
            .find(|(id, _)| *id == person)
            .map(|(_, cat)| *cat)
    }

    pub fn count(&self, category: HeirCategory) -> usize {
        self.by_category
            .get(&category)
            .map(|members| members.len())
            .unwrap_or(0)
    }

    /// Number of classified siblings of any subtype. Taken before
    /// exclusion: siblings barred by the father still restrict the
    /// mother's share.
    pub fn sibling_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, cat)| cat.is_sibling())
            .count()
    }
}

/// One step of the category state machine: the category after extending a
/// partial lineage by one step. `None` as input state means "at the
/// deceased". Returns `None` for step sequences that do not occur in
/// tree-generated lineages (e.g. a spouse step mid-path).
fn step_category(state: Option<HeirCategory>, step: RelationStep) -> Option<HeirCategory> {
    use crate::domain::RelationStep as S;
    use HeirCategory::*;

    let next = match (state, step) {
        (None, S::Husband) => Husband,
        (None, S::Wife) => Wife,
        (None, S::Father) => Father,
        (None, S::Mother) => Mother,
        (None, S::Son) => Son,
        (None, S::Daughter) => Daughter,
        (None, S::Brother(SiblingKind::Full)) => BrotherFull,
        (None, S::Brother(SiblingKind::Paternal)) => BrotherPaternal,
        (None, S::Brother(SiblingKind::Maternal)) => BrotherMaternal,
        (None, S::Sister(SiblingKind::Full)) => SisterFull,
        (None, S::Sister(SiblingKind::Paternal)) => SisterPaternal,
        (None, S::Sister(SiblingKind::Maternal)) => SisterMaternal,

        // Descendants: the agnatic line recurses through sons; any step
        // through a daughter leaves it.
        (Some(Son | Grandson), S::Son) => Grandson,
        (Some(Son | Grandson), S::Daughter) => Granddaughter,
        (Some(Daughter | Granddaughter), S::Son | S::Daughter) => DistantKindred,

        // Ascendants: fathers of fathers stay agnatic; a father step after
        // any mother step breaks the line.
        (Some(Father | Grandfather), S::Father) => Grandfather,
        (Some(Father | Grandfather), S::Mother) => Grandmother,
        (Some(Mother | Grandmother), S::Mother) => Grandmother,
        (Some(Mother | Grandmother), S::Father) => DistantKindred,

        // Siblings of ascendants: the father's (or agnatic grandfather's)
        // full/paternal brothers are the uncle line; everything else on
        // that level is distant kindred.
        (Some(Father | Grandfather), S::Brother(SiblingKind::Full)) => UncleFull,
        (Some(Father | Grandfather), S::Brother(SiblingKind::Paternal)) => UnclePaternal,
        (Some(Father | Grandfather), S::Brother(SiblingKind::Maternal) | S::Sister(_)) => {
            DistantKindred
        }
        (Some(Mother | Grandmother), S::Brother(_) | S::Sister(_)) => DistantKindred,

        // Siblings' descendants: sons of full/paternal brothers recurse as
        // nephews; daughters and maternal-brother children fall out.
        (Some(BrotherFull), S::Son) => NephewFull,
        (Some(BrotherPaternal), S::Son) => NephewPaternal,
        (Some(NephewFull), S::Son) => NephewFull,
        (Some(NephewPaternal), S::Son) => NephewPaternal,
        (Some(BrotherFull | BrotherPaternal | NephewFull | NephewPaternal), S::Daughter) => {
            DistantKindred
        }
        (Some(BrotherMaternal | SisterFull | SisterPaternal | SisterMaternal), S::Son | S::Daughter) => {
            DistantKindred
        }

        // Uncles' descendants: sons recurse, daughters fall out.
        (Some(UncleFull), S::Son) => SonOfUncleFull,
        (Some(UnclePaternal), S::Son) => SonOfUnclePaternal,
        (Some(SonOfUncleFull), S::Son) => SonOfUncleFull,
        (Some(SonOfUnclePaternal), S::Son) => SonOfUnclePaternal,
        (Some(UncleFull | UnclePaternal | SonOfUncleFull | SonOfUnclePaternal), S::Daughter) => {
            DistantKindred
        }

        // Distant kindred stay distant over any blood step.
        (Some(DistantKindred), S::Father | S::Mother | S::Son | S::Daughter) => DistantKindred,
        (Some(DistantKindred), S::Brother(_) | S::Sister(_)) => DistantKindred,

        _ => return None,
    };
    Some(next)
}

fn child_step(sex: Sex) -> RelationStep {
    match sex {
        Sex::Male => RelationStep::Son,
        Sex::Female => RelationStep::Daughter,
    }
}

fn sibling_step(sex: Sex, kind: SiblingKind) -> RelationStep {
    match sex {
        Sex::Male => RelationStep::Brother(kind),
        Sex::Female => RelationStep::Sister(kind),
    }
}

/// Which edges to follow out of a node, given the category its lineage has
/// reached. Expansion stays on blood paths: spouse edges are only followed
/// from the deceased, and parents are only climbed on the ascendant side —
/// this is what keeps in-laws (a sibling's spouse, a grandchild's father)
/// out of the lineage space entirely.
fn expansions(
    tree: &FamilyTree,
    person: PersonId,
    state: HeirCategory,
    ancestor_side: bool,
) -> Vec<(PersonId, RelationStep)> {
    use HeirCategory::*;

    let children = |out: &mut Vec<(PersonId, RelationStep)>| {
        for &child in tree.children_of(person) {
            if let Some(p) = tree.person(child) {
                out.push((child, child_step(p.sex)));
            }
        }
    };
    let parents = |out: &mut Vec<(PersonId, RelationStep)>| {
        if let Some(father) = tree.father_of(person) {
            out.push((father, RelationStep::Father));
        }
        if let Some(mother) = tree.mother_of(person) {
            out.push((mother, RelationStep::Mother));
        }
    };
    let siblings = |out: &mut Vec<(PersonId, RelationStep)>| {
        for (sibling, kind) in tree.siblings_of(person) {
            if let Some(p) = tree.person(sibling) {
                out.push((sibling, sibling_step(p.sex, kind)));
            }
        }
    };

    let mut out = Vec::new();
    match state {
        Husband | Wife => {}
        Son | Grandson | Daughter | Granddaughter => children(&mut out),
        Father | Grandfather | Mother | Grandmother => {
            parents(&mut out);
            siblings(&mut out);
        }
        BrotherFull | BrotherPaternal | BrotherMaternal | SisterFull | SisterPaternal
        | SisterMaternal => children(&mut out),
        NephewFull | NephewPaternal | UncleFull | UnclePaternal | SonOfUncleFull
        | SonOfUnclePaternal => children(&mut out),
        DistantKindred => {
            children(&mut out);
            if ancestor_side {
                parents(&mut out);
                siblings(&mut out);
            }
        }
    }
    out
}

/// Classify every alive relative of the deceased.
///
/// Errors with `UnclassifiablePerson` for any declared person who is not
/// connected to the deceased, or who is connected but matches no relation
/// pattern (affine relatives such as a sibling's spouse). This is the
/// input-validation backstop: nobody is silently dropped.
#[instrument(level = "debug", skip(tree))]
pub fn classify(tree: &FamilyTree) -> EngineResult<Classification> {
    let deceased = tree.deceased().ok_or(EngineError::DeceasedNotSet)?;
    let reachable = tree
        .reachable_from_deceased()
        .map_err(|_| EngineError::DeceasedNotSet)?;

    // (person, category, degree, came via ancestor-side step)
    let mut queue: VecDeque<(PersonId, HeirCategory, usize, bool)> = VecDeque::new();
    let mut best: HashMap<PersonId, (HeirCategory, usize)> = HashMap::new();
    let mut expanded: HashSet<(PersonId, HeirCategory, bool)> = HashSet::new();

    let mut offer = |person: PersonId,
                     category: HeirCategory,
                     degree: usize,
                     best: &mut HashMap<PersonId, (HeirCategory, usize)>| {
        let improves = match best.get(&person) {
            Some(&(current, current_degree)) => {
                (category.precedence(), degree) < (current.precedence(), current_degree)
            }
            None => true,
        };
        if improves {
            best.insert(person, (category, degree));
        }
    };

    // Seed with the deceased's direct edges.
    let mut seeds: Vec<(PersonId, RelationStep)> = Vec::new();
    if let Some(father) = tree.father_of(deceased) {
        seeds.push((father, RelationStep::Father));
    }
    if let Some(mother) = tree.mother_of(deceased) {
        seeds.push((mother, RelationStep::Mother));
    }
    for &spouse in tree.spouses_of(deceased) {
        if let Some(p) = tree.person(spouse) {
            let step = match p.sex {
                Sex::Male => RelationStep::Husband,
                Sex::Female => RelationStep::Wife,
            };
            seeds.push((spouse, step));
        }
    }
    for &child in tree.children_of(deceased) {
        if let Some(p) = tree.person(child) {
            seeds.push((child, child_step(p.sex)));
        }
    }
    for (sibling, kind) in tree.siblings_of(deceased) {
        if let Some(p) = tree.person(sibling) {
            seeds.push((sibling, sibling_step(p.sex, kind)));
        }
    }
    for (person, step) in seeds {
        if let Some(category) = step_category(None, step) {
            let ancestor_side = matches!(step, RelationStep::Father | RelationStep::Mother);
            offer(person, category, 1, &mut best);
            queue.push_back((person, category, 1, ancestor_side));
        }
    }

    while let Some((person, state, degree, ancestor_side)) = queue.pop_front() {
        if !expanded.insert((person, state, ancestor_side)) {
            continue;
        }
        for (next, step) in expansions(tree, person, state, ancestor_side) {
            if next == deceased {
                continue;
            }
            let Some(next_cat) = step_category(Some(state), step) else {
                continue;
            };
            let next_ancestor_side =
                matches!(step, RelationStep::Father | RelationStep::Mother);
            offer(next, next_cat, degree + 1, &mut best);
            queue.push_back((next, next_cat, degree + 1, next_ancestor_side));
        }
    }

    // Total classification: every declared person must be reachable and,
    // if alive, must have landed on a category.
    let mut entries = Vec::new();
    for (id, person) in tree.iter() {
        if id == deceased {
            continue;
        }
        if !reachable.contains(&id) {
            return Err(EngineError::UnclassifiablePerson {
                name: person.name.clone(),
            });
        }
        if !person.alive {
            continue;
        }
        match best.get(&id) {
            Some(&(category, _)) => entries.push((id, category)),
            None => {
                return Err(EngineError::UnclassifiablePerson {
                    name: person.name.clone(),
                })
            }
        }
    }

    let mut by_category: BTreeMap<HeirCategory, Vec<PersonId>> = BTreeMap::new();
    for &(id, category) in &entries {
        by_category.entry(category).or_default().push(id);
    }

    Ok(Classification {
        entries,
        by_category,
    })
}
