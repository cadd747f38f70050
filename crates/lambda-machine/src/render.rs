//! Textual rendering of live nodes for drivers and steppers.

use crate::node::{LiveNode, NodeKind};
use crate::template::{Template, TemplateKind};
use lambda_types::PLACEHOLDER;
use std::any::Any;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Top,
    Function,
    Argument,
}

/// Render a node without reducing it.
///
/// `name_of` turns attached metadata into a display name; nodes whose
/// metadata is missing or not understood by `name_of` show as `(??)`.
/// Indirections are shown by name and never followed, and an application
/// reached again while it is being rendered shows as its name, so recursive
/// globals render finitely.
pub fn render<F>(node: &LiveNode, name_of: F) -> String
where
    F: Fn(&dyn Any) -> Option<String>,
{
    let mut renderer = Renderer {
        name_of: &name_of,
        out: String::new(),
        active: Vec::new(),
    };
    renderer.node(node, Position::Top);
    renderer.out
}

struct Renderer<'a> {
    name_of: &'a dyn Fn(&dyn Any) -> Option<String>,
    out: String,
    /// Applications on the current rendering path.
    active: Vec<LiveNode>,
}

impl Renderer<'_> {
    fn name(&mut self, meta: Option<&dyn Any>) {
        let name = meta
            .and_then(|meta| (self.name_of)(meta))
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        self.out.push_str(&name);
    }

    fn parens(&mut self, wrap: bool, body: impl FnOnce(&mut Self)) {
        if wrap {
            self.out.push('(');
        }
        body(self);
        if wrap {
            self.out.push(')');
        }
    }

    fn node(&mut self, node: &LiveNode, pos: Position) {
        match node.kind() {
            NodeKind::Int(n) => {
                let _ = write!(self.out, "{n}");
            }
            NodeKind::Indirection(_) => self.name(node.meta()),
            NodeKind::Builtin(builtin) => {
                let operands = builtin.operands();
                self.parens(pos == Position::Argument && !operands.is_empty(), |r| {
                    r.out.push_str(&builtin.name());
                    for operand in &operands {
                        r.out.push(' ');
                        r.node(operand, Position::Argument);
                    }
                });
            }
            NodeKind::Closure(closure) => {
                self.parens(pos != Position::Top, |r| r.lambda(node.meta(), closure.body()));
            }
            NodeKind::Application(app) => {
                if self.active.iter().any(|seen| seen.ptr_eq(node)) {
                    // A collapse or head step stored the node inside itself.
                    self.name(node.meta());
                    return;
                }
                self.active.push(node.clone());
                match app.right() {
                    None => self.node(&app.left(), pos),
                    Some(right) => self.parens(pos == Position::Argument, |r| {
                        r.node(&app.left(), Position::Function);
                        r.out.push(' ');
                        r.node(&right, Position::Argument);
                    }),
                }
                self.active.pop();
            }
        }
    }

    fn lambda(&mut self, meta: Option<&dyn Any>, body: &Template) {
        self.out.push('\\');
        self.name(meta);
        self.out.push_str(" -> ");
        self.template(body, Position::Top);
    }

    fn template(&mut self, template: &Template, pos: Position) {
        match template.kind() {
            TemplateKind::Var | TemplateKind::Global(_) => self.name(template.meta()),
            TemplateKind::Abstraction { body, .. } => {
                self.parens(pos != Position::Top, |r| r.lambda(template.meta(), body));
            }
            TemplateKind::Application { left, right, .. } => {
                self.parens(pos == Position::Argument, |r| {
                    r.template(left, Position::Function);
                    r.out.push(' ');
                    r.template(right, Position::Argument);
                });
            }
            TemplateKind::Constant(node) => self.node(node, pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Env, GlobalTable, Session};
    use lambda_types::{FileInfo, MetaInfo};

    fn meta(name: &str) -> MetaInfo {
        MetaInfo::new(FileInfo::new("test.lambda", 1, 1), name)
    }

    fn show(node: &LiveNode) -> String {
        render(node, MetaInfo::name_of)
    }

    #[test]
    fn test_render_int() {
        assert_eq!(show(&LiveNode::int(-12)), "-12");
    }

    #[test]
    fn test_render_closure_from_template() {
        // \x -> \y -> x
        let template = Template::abstraction(
            true,
            Template::abstraction(false, Template::var().with_meta(meta("x"))).with_meta(meta("y")),
        )
        .with_meta(meta("x"));
        let node = template.materialize(&Env::empty()).unwrap();
        assert_eq!(show(&node), "\\x -> \\y -> x");
    }

    #[test]
    fn test_render_application_left_assoc() {
        let table = GlobalTable::new();
        let f = table.declare("f", None).unwrap();
        let g = table.declare("g", None).unwrap();
        // f 1 (g 2)
        let template = Template::application(
            0,
            0,
            Template::application(
                0,
                0,
                Template::global(f.clone()).with_meta(meta("f")),
                Template::constant(LiveNode::int(1)),
            ),
            Template::application(
                0,
                0,
                Template::global(g).with_meta(meta("g")),
                Template::constant(LiveNode::int(2)),
            ),
        );
        let node = template.materialize(&Env::empty()).unwrap();
        assert_eq!(show(&node), "f 1 (g 2)");
    }

    #[test]
    fn test_render_placeholder_for_missing_or_foreign_meta() {
        let table = GlobalTable::new();
        let slot = table.declare("h", None).unwrap();
        let bare = Template::global(slot.clone()).materialize(&Env::empty()).unwrap();
        assert_eq!(show(&bare), PLACEHOLDER);

        let foreign = Template::global(slot).with_meta(7_u8).materialize(&Env::empty()).unwrap();
        assert_eq!(show(&foreign), "(??)");
    }

    #[test]
    fn test_render_collapsed_application_shows_value() {
        // (\x -> x) 5
        let template = Template::application(
            0,
            0,
            Template::abstraction(true, Template::var().with_meta(meta("x"))).with_meta(meta("x")),
            Template::constant(LiveNode::int(5)),
        );
        let node = template.materialize(&Env::empty()).unwrap();
        assert_eq!(show(&node), "(\\x -> x) 5");
        node.reduce(&Session::new()).unwrap();
        assert_eq!(show(&node), "5");
    }

    #[test]
    fn test_custom_name_of() {
        let table = GlobalTable::new();
        let slot = table.declare("k", None).unwrap();
        let node = Template::global(slot)
            .with_meta("k".to_string())
            .materialize(&Env::empty())
            .unwrap();
        let rendered = render(&node, |meta| {
            meta.downcast_ref::<String>().map(|s| s.to_uppercase())
        });
        assert_eq!(rendered, "K");
    }

    #[test]
    fn test_render_self_referential_global_while_stepping() {
        // g = (\x -> x) g
        let table = GlobalTable::new();
        let g = table.declare("g", None).unwrap();
        let definition = Template::application(
            0,
            0,
            Template::abstraction(true, Template::var().with_meta(meta("x"))).with_meta(meta("x")),
            Template::global(g.clone()).with_meta(meta("g")),
        );
        table.define(&g, &definition).unwrap();

        let session = Session::new().single_step(true);
        let entry = table.value("g").unwrap();
        let mut node = entry.clone();
        let mut steps = Vec::new();
        // Apply, dereference g, then flatten the collapsed cell into itself.
        for _ in 0..3 {
            node = node.reduce(&session).unwrap();
            steps.push(show(&node));
        }
        assert_eq!(steps, vec!["g", "g", PLACEHOLDER]);
        assert!(entry.as_application().unwrap().left().ptr_eq(&entry));
        assert_eq!(show(&entry), PLACEHOLDER);
    }
}
