//! Rendering of ticket titles and bodies with Tera.
//!
//! A template ticket's title and body are compiled as two independent
//! templates. Both see the same context:
//!
//! - `CurrentTime`: the reference time (RFC 3339)
//! - `LastIssue`: the prior ticket sharing the template's labels
//! - `AddDay(days=n)`: reference time plus `n` days (RFC 3339)
//! - `AddDateAndFormat(format="2006-01-02", days=n)`: the same, formatted
use chrono::{DateTime, FixedOffset};
use log::*;
use tera::{Context, Tera};

use crate::{
    error::{IssueCreatorError, TemplateField},
    ticket::Ticket,
};

/// Date helpers registered as template functions.
pub mod functions;

/// Go reference layout support for date formats.
pub mod layout;

const TITLE_TEMPLATE: &str = "title";
const BODY_TEMPLATE: &str = "body";

/// Rendered title and body of a ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTemplates {
    pub title: String,
    pub body: String,
}

/// Compiles ticket templates against a fixed reference time.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRenderer {
    reference: DateTime<FixedOffset>,
}

impl TemplateRenderer {
    pub fn new(reference: DateTime<FixedOffset>) -> Self {
        Self { reference }
    }

    /// Compile the title and body of `template`, title first.
    pub fn compile(
        &self,
        template: &Ticket,
    ) -> Result<CompiledTemplates, IssueCreatorError> {
        debug!("compiling template title: {}", template.title);
        debug!("compiling template body: {}", template.body);

        let mut tera = Tera::default();

        tera.register_function(
            functions::ADD_DATE_AND_FORMAT,
            functions::AddDateAndFormat::new(self.reference),
        );
        tera.register_function(
            functions::ADD_DAY,
            functions::AddDay::new(self.reference),
        );

        tera.add_raw_template(TITLE_TEMPLATE, &template.title)
            .map_err(|source| IssueCreatorError::Parse {
                field: TemplateField::Title,
                source,
            })?;

        tera.add_raw_template(BODY_TEMPLATE, &template.body)
            .map_err(|source| IssueCreatorError::Parse {
                field: TemplateField::Body,
                source,
            })?;

        Ok(CompiledTemplates {
            tera,
            reference: self.reference,
        })
    }
}

/// Title and body templates ready to execute.
pub struct CompiledTemplates {
    tera: Tera,
    reference: DateTime<FixedOffset>,
}

impl CompiledTemplates {
    /// Execute both templates with `last_issue` in the context.
    pub fn render(
        &self,
        last_issue: &Ticket,
    ) -> Result<RenderedTemplates, IssueCreatorError> {
        let mut context = Context::new();
        context.insert("CurrentTime", &self.reference.to_rfc3339());
        context.insert("LastIssue", last_issue);

        let title =
            self.tera.render(TITLE_TEMPLATE, &context).map_err(|source| {
                IssueCreatorError::Render {
                    field: TemplateField::Title,
                    source,
                }
            })?;

        let body =
            self.tera.render(BODY_TEMPLATE, &context).map_err(|source| {
                IssueCreatorError::Render {
                    field: TemplateField::Body,
                    source,
                }
            })?;

        Ok(RenderedTemplates { title, body })
    }
}
