//! Blueprint-to-tool-definition synthesis.
//!
//! Deterministic: the same blueprint and config always yield byte-identical
//! output. All ordering comes from the blueprint's own collection order
//! (parameters, option values, group first appearance), optionally overridden
//! by `orderedMustacheKeys`.

use benchwright_core::{Blueprint, ColumnSpec, ParamSpec, WidgetKind, classify, contract};
use benchwright_xml::{Element, render};
use indexmap::IndexMap;
use serde_json::Value;

use crate::config::SynthConfig;
use crate::text;

/// Fixed platform schema version carried by every definition.
const PROFILE_VERSION: &str = "24.2";

/// Builds a tool definition from one blueprint.
pub struct Synthesizer<'a> {
    blueprint: &'a Blueprint,
    config: &'a SynthConfig,
}

/// One top-level entry under `inputs`: either a single widget or a section.
/// `keys` holds the parameter keys the entry owns, for override ordering.
struct InputEntry {
    keys: Vec<String>,
    element: Element,
}

impl<'a> Synthesizer<'a> {
    /// Create a synthesizer over a blueprint and deployment config.
    #[must_use]
    pub fn new(blueprint: &'a Blueprint, config: &'a SynthConfig) -> Self {
        Self { blueprint, config }
    }

    /// Synthesize the tool definition as XML text.
    #[must_use]
    pub fn synthesize(&self) -> String {
        render(&self.build_tool())
    }

    /// Build the tool definition as an element tree.
    ///
    /// Top-level child order is an external contract: description,
    /// requirements, command, configfiles, inputs, outputs, help, citations.
    #[must_use]
    pub fn build_tool(&self) -> Element {
        Element::new("tool")
            .attr("id", self.tool_id())
            .attr("name", &self.blueprint.title)
            .attr("version", text::docker_tag(&self.config.docker_image))
            .attr("profile", PROFILE_VERSION)
            .child(self.description_element())
            .child(self.requirements_element())
            .child(self.command_element())
            .child(self.configfiles_element())
            .child(self.inputs_element())
            .child(self.outputs_element())
            .child(self.help_element())
            .child(self.citations_element())
    }

    /// Stable, filesystem-safe tool id derived from the command name and the
    /// wrapped function.
    #[must_use]
    pub fn tool_id(&self) -> String {
        format!("{}_{}", self.config.cli_command, self.blueprint.r_function).to_lowercase()
    }

    fn description_element(&self) -> Element {
        Element::new("description").text(text::clean_markdown_links(&self.blueprint.description))
    }

    fn requirements_element(&self) -> Element {
        Element::new("requirements").child(
            Element::new("container")
                .attr("type", "docker")
                .text(&self.config.docker_image),
        )
    }

    fn configfiles_element(&self) -> Element {
        Element::new("configfiles").child(
            Element::new("inputs")
                .attr("name", "params_json")
                .attr("filename", contract::PARAMS_FILE)
                .attr("data_style", "paths"),
        )
    }

    fn command_element(&self) -> Element {
        let mut cmd = format!(
            "{} '{}' '{}'",
            contract::NORMALIZER_PROGRAM,
            contract::PARAMS_FILE,
            contract::CLEANED_PARAMS_FILE,
        );

        let bool_keys = self.bool_keys();
        if !bool_keys.is_empty() {
            cmd.push_str(&format!(
                " {} {}",
                contract::BOOL_VALUES_FLAG,
                bool_keys.join(" ")
            ));
        }

        // List keys are bare names; the `_repeat` container naming stays an
        // implementation detail of the widget shape.
        let list_keys = self.list_keys();
        if !list_keys.is_empty() {
            cmd.push_str(&format!(
                " {} {}",
                contract::LIST_VALUES_FLAG,
                list_keys.join(" ")
            ));
        }

        let delimited_keys = self.delimited_keys();
        if !delimited_keys.is_empty() {
            cmd.push_str(&format!(
                " {} '{}' {} {}",
                contract::LIST_SEP_FLAG,
                contract::DEFAULT_LIST_SEPARATOR,
                contract::LIST_FIELDS_FLAG,
                delimited_keys.join(" ")
            ));
        }

        cmd.push_str(&format!(
            "\n&& {} run {} --params '{}'",
            self.config.cli_command,
            self.blueprint.r_function,
            contract::CLEANED_PARAMS_FILE,
        ));

        Element::new("command")
            .attr("detect_errors", "exit_code")
            .cdata(cmd)
    }

    /// Parameter keys the normalizer must boolean-coerce.
    fn bool_keys(&self) -> Vec<String> {
        self.blueprint
            .parameters
            .iter()
            .filter(|p| classify(&p.param_type).is_boolean)
            .map(|p| p.key.clone())
            .collect()
    }

    /// Parameter keys the normalizer must list-process: list-like parameters,
    /// multi columns, and delimited free-text fields.
    fn list_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        for param in &self.blueprint.parameters {
            let class = classify(&param.param_type);
            if class.is_list_like
                || (class.widget == WidgetKind::Text && contract::needs_special_chars(&param.key))
            {
                keys.push(param.key.clone());
            }
        }
        for column in &self.blueprint.columns {
            if column.is_multi {
                keys.push(column.key.clone());
            }
        }
        keys
    }

    /// Free-text keys parsed as delimited text rather than repeat containers.
    fn delimited_keys(&self) -> Vec<String> {
        self.blueprint
            .parameters
            .iter()
            .filter(|p| {
                classify(&p.param_type).widget == WidgetKind::Text
                    && contract::needs_special_chars(&p.key)
            })
            .map(|p| p.key.clone())
            .collect()
    }

    fn inputs_element(&self) -> Element {
        // Ungrouped widgets in blueprint order: datasets, then parameters,
        // then columns. Grouped parameters collect into one section per
        // distinct group, sections ordered by first appearance.
        let mut ungrouped: Vec<InputEntry> = Vec::new();
        let mut sections: IndexMap<String, InputEntry> = IndexMap::new();

        for dataset in &self.blueprint.input_datasets {
            ungrouped.push(InputEntry {
                keys: vec![dataset.key.clone()],
                element: self.param_widget(dataset),
            });
        }

        for param in &self.blueprint.parameters {
            let widget = self.param_widget(param);
            match param.param_group.as_deref().filter(|g| !g.is_empty()) {
                Some(group) => {
                    let entry = sections.entry(group.to_string()).or_insert_with(|| {
                        InputEntry {
                            keys: Vec::new(),
                            element: Element::new("section")
                                .attr("name", text::section_id(group))
                                .attr("title", group)
                                .attr("expanded", "false"),
                        }
                    });
                    entry.keys.push(param.key.clone());
                    entry.element.push(widget);
                }
                None => ungrouped.push(InputEntry {
                    keys: vec![param.key.clone()],
                    element: widget,
                }),
            }
        }

        for column in &self.blueprint.columns {
            ungrouped.push(InputEntry {
                keys: vec![column.key.clone()],
                element: self.column_widget(column),
            });
        }

        let mut entries: Vec<InputEntry> = ungrouped;
        entries.extend(sections.into_values());

        if !self.blueprint.ordered_mustache_keys.is_empty() {
            self.apply_key_order(&mut entries);
        }

        let mut inputs = Element::new("inputs");
        for entry in entries {
            inputs.push(entry.element);
        }
        inputs
    }

    /// Reorder top-level input entries per `orderedMustacheKeys`. An entry
    /// sorts at the first listed position of any key it owns (a section sits
    /// where its earliest-listed member does); unlisted entries keep their
    /// base order after all listed ones.
    fn apply_key_order(&self, entries: &mut [InputEntry]) {
        let order = &self.blueprint.ordered_mustache_keys;
        let position = |entry: &InputEntry| -> usize {
            entry
                .keys
                .iter()
                .filter_map(|k| order.iter().position(|o| o == k))
                .min()
                .unwrap_or(usize::MAX)
        };
        entries.sort_by_key(position);
    }

    fn param_widget(&self, spec: &ParamSpec) -> Element {
        let class = classify(&spec.param_type);
        match class.widget {
            WidgetKind::Text => self.text_widget(spec),
            WidgetKind::Boolean => self.boolean_widget(spec),
            WidgetKind::Integer => self.numeric_widget(spec, "integer", class.implied_min),
            WidgetKind::Float => self.numeric_widget(spec, "float", None),
            WidgetKind::Select => self.select_widget(spec, false),
            WidgetKind::MultiSelect => self.select_widget(spec, true),
            WidgetKind::Repeat => self.repeat_widget(
                &spec.key,
                &spec.display_name,
                &spec.description,
            ),
            WidgetKind::Data => {
                let format = class.data_format.as_deref().unwrap_or("data");
                self.data_widget(spec, format)
            }
        }
    }

    fn text_widget(&self, spec: &ParamSpec) -> Element {
        let mut el = Element::new("param")
            .attr("name", &spec.key)
            .attr("type", "text")
            .attr("label", &spec.display_name)
            .attr("value", text::attr_value(spec.default_value.as_ref()));
        if spec.optional {
            el = el.attr("optional", "true");
        }
        el = self.with_help(el, &spec.description);
        if contract::needs_special_chars(&spec.key) {
            el = el.child(sanitizer_element());
        }
        el
    }

    fn boolean_widget(&self, spec: &ParamSpec) -> Element {
        let checked = text::default_checked(spec.default_value.as_ref());
        let mut el = Element::new("param")
            .attr("name", &spec.key)
            .attr("type", "boolean")
            .attr("label", &spec.display_name)
            .attr("checked", checked.to_string())
            .attr("truevalue", "True")
            .attr("falsevalue", "False");
        if spec.optional {
            el = el.attr("optional", "true");
        }
        self.with_help(el, &spec.description)
    }

    fn numeric_widget(&self, spec: &ParamSpec, kind: &str, implied_min: Option<i64>) -> Element {
        let mut el = Element::new("param")
            .attr("name", &spec.key)
            .attr("type", kind)
            .attr("label", &spec.display_name)
            .attr("value", text::attr_value(spec.default_value.as_ref()));
        // The blueprint's own bound wins over the tag-implied one.
        let min = match &spec.param_min {
            Some(v) => Some(text::attr_value(Some(v))),
            None => implied_min.map(|m| m.to_string()),
        };
        if let Some(min) = min {
            el = el.attr("min", min);
        }
        if let Some(max) = &spec.param_max {
            el = el.attr("max", text::attr_value(Some(max)));
        }
        if spec.optional {
            el = el.attr("optional", "true");
        }
        self.with_help(el, &spec.description)
    }

    fn select_widget(&self, spec: &ParamSpec, multiple: bool) -> Element {
        let mut el = Element::new("param")
            .attr("name", &spec.key)
            .attr("type", "select")
            .attr("label", &spec.display_name);
        if multiple {
            el = el.attr("multiple", "true").attr("optional", "true");
        } else if spec.optional {
            el = el.attr("optional", "true");
        }
        el = self.with_help(el, &spec.description);
        for value in &spec.param_values {
            let rendered = text::attr_value(Some(value));
            let mut option = Element::new("option").attr("value", &rendered);
            if is_selected(spec.default_value.as_ref(), value, multiple) {
                option = option.attr("selected", "true");
            }
            el = el.child(option.text(rendered));
        }
        el
    }

    fn repeat_widget(&self, key: &str, title: &str, description: &str) -> Element {
        let mut inner = Element::new("param")
            .attr("name", contract::REPEAT_VALUE_FIELD)
            .attr("type", "text")
            .attr("label", title)
            .attr("value", "");
        inner = self.with_help(inner, description);
        if contract::needs_special_chars(key) {
            inner = inner.child(sanitizer_element());
        }
        Element::new("repeat")
            .attr("name", contract::repeat_name(key))
            .attr("title", title)
            .child(inner)
    }

    fn data_widget(&self, spec: &ParamSpec, format: &str) -> Element {
        let mut el = Element::new("param")
            .attr("name", &spec.key)
            .attr("type", "data")
            .attr("format", format)
            .attr("label", &spec.display_name);
        if spec.optional {
            el = el.attr("optional", "true");
        }
        self.with_help(el, &spec.description)
    }

    fn column_widget(&self, column: &ColumnSpec) -> Element {
        if column.is_multi {
            return self.repeat_widget(&column.key, &column.display_name, &column.description);
        }
        let mut el = Element::new("param")
            .attr("name", &column.key)
            .attr("type", "text")
            .attr("label", &column.display_name)
            .attr("value", text::attr_value(column.default_value.as_ref()));
        el = self.with_help(el, &column.description);
        if contract::needs_special_chars(&column.key) {
            el = el.child(sanitizer_element());
        }
        el
    }

    fn with_help(&self, el: Element, description: &str) -> Element {
        if description.is_empty() {
            el
        } else {
            el.attr("help", text::clean_markdown_links(description))
        }
    }

    fn outputs_element(&self) -> Element {
        let mut outputs = Element::new("outputs");
        for (name, spec) in &self.blueprint.outputs {
            match spec.kind.as_str() {
                "file" => outputs.push(
                    Element::new("data")
                        .attr("name", name)
                        .attr("format", text::format_from_extension(&spec.name))
                        .attr("from_work_dir", &spec.name)
                        .attr("label", format!("${{tool.name}}: {}", name)),
                ),
                "directory" => outputs.push(
                    Element::new("collection")
                        .attr("name", name)
                        .attr("type", "list")
                        .attr("label", format!("${{tool.name}}: {}", name))
                        .child(
                            Element::new("discover_datasets")
                                .attr("directory", &spec.name)
                                .attr("pattern", "__name_and_ext__"),
                        ),
                ),
                other => {
                    tracing::debug!(kind = other, output = %name, "skipping output with unrecognized kind");
                }
            }
        }
        // Troubleshooting artifacts, emitted regardless of blueprint contents.
        outputs.push(
            Element::new("data")
                .attr("name", "params_json_debug")
                .attr("format", "json")
                .attr("from_work_dir", contract::PARAMS_FILE)
                .attr("label", "${tool.name}: raw parameters (debug)"),
        );
        outputs.push(
            Element::new("data")
                .attr("name", "cleaned_params_debug")
                .attr("format", "json")
                .attr("from_work_dir", contract::CLEANED_PARAMS_FILE)
                .attr("label", "${tool.name}: cleaned parameters (debug)"),
        );
        outputs
    }

    fn help_element(&self) -> Element {
        let text = format!(
            "**{} {}**\n\n{}\n\nSource: https://github.com/{}\n",
            self.config.pkg_name,
            self.blueprint.title,
            text::clean_markdown_links(&self.blueprint.description),
            self.config.repo_name,
        );
        Element::new("help").cdata(text)
    }

    fn citations_element(&self) -> Element {
        Element::new("citations").child(
            Element::new("citation")
                .attr("type", "doi")
                .text(&self.config.citation_doi),
        )
    }
}

/// Whether a select option matches the declared default. Multi-selects
/// accept a list default and mark every member selected.
fn is_selected(default: Option<&Value>, option: &Value, multiple: bool) -> bool {
    match default {
        None => false,
        Some(Value::Array(members)) if multiple => members.contains(option),
        Some(single) => single == option,
    }
}

fn sanitizer_element() -> Element {
    let mut valid = Element::new("valid").attr("initial", "default");
    for c in contract::SANITIZER_ALLOWED_CHARS {
        valid.push(Element::new("add").attr("value", c.to_string()));
    }
    Element::new("sanitizer").child(valid)
}
