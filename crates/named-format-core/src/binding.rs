//! Binding: validates a candidate's template against its signature.

use crate::config::EmitterOptions;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::discovery::Candidate;
use crate::model::{BoundMethod, OwningType};

/// Validate `candidate` and turn it into a [`BoundMethod`].
///
/// Checks run in order and the first failure wins: blank template, bracket
/// structure, hole count against parameter count, then (only with
/// `strict_placeholder_names`) placeholder names against parameter names.
/// Parameters are always substituted in declaration order.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn bind(
    candidate: Candidate,
    owner: &OwningType,
    options: &EmitterOptions,
) -> Result<BoundMethod, Diagnostic> {
    let span = candidate.span;
    let fail = move |kind| Err(Diagnostic::new(kind, span));
    let template = &candidate.template;
    let params = candidate.params.len();

    // A blank template without parameters is a constant.
    if template.is_blank() && params > 0 {
        return fail(DiagnosticKind::TemplateEmpty);
    }

    let validation = template.validate();
    if !validation.well_formed {
        return fail(DiagnosticKind::TemplateMalformed);
    }

    if validation.holes != params {
        return fail(DiagnosticKind::HoleCountMismatch {
            holes: validation.holes,
            params,
        });
    }

    if options.strict_placeholder_names {
        let mismatch = template
            .placeholder_names()
            .zip(&candidate.params)
            .find(|(placeholder, param)| param.name != placeholder.trim());
        if let Some((placeholder, param)) = mismatch {
            return fail(DiagnosticKind::PlaceholderNameMismatch {
                placeholder: placeholder.to_owned(),
                parameter: param.name.to_string(),
            });
        }
    }

    let Candidate {
        attrs,
        vis,
        sig,
        params,
        template,
        ..
    } = candidate;

    Ok(BoundMethod {
        owner: owner.clone(),
        name: sig.ident.clone(),
        vis,
        sig,
        attrs,
        params,
        template,
        span,
    })
}
