use crate::data_source::DataSource;
use crate::schema::{join_path, Cardinality, FieldSchema};

fn anchor(path: &str) -> String {
    format!("nestedatt--{}", path.replace('.', "--"))
}

fn attribute_line(attribute: &FieldSchema, path: &str) -> String {
    let mut line = format!(
        "- `{}` ({})",
        attribute.name,
        attribute.kind.type_name()
    );
    if !attribute.markdown_description.is_empty() {
        line.push(' ');
        line.push_str(attribute.markdown_description);
    }
    for validator in &attribute.validators {
        line.push_str(&format!(" Value {}.", validator.describe()));
    }
    if !attribute.attributes().is_empty() {
        line.push_str(&format!(
            " (see [below for nested schema](#{}))",
            anchor(path)
        ));
    }
    line
}

fn render_attributes(
    out: &mut Vec<String>,
    attributes: &[FieldSchema],
    parent: &str,
    top_level: bool,
) {
    let groups = [
        (Cardinality::Required, "Required"),
        (Cardinality::Optional, "Optional"),
        (Cardinality::Computed, "Read-Only"),
    ];
    for (cardinality, title) in groups {
        let members: Vec<&FieldSchema> = attributes
            .iter()
            .filter(|a| a.cardinality == cardinality)
            .collect();
        if members.is_empty() {
            continue;
        }
        if top_level {
            out.push(format!("### {}\n", title));
        } else {
            out.push(format!("{}:\n", title));
        }
        for attribute in members {
            out.push(attribute_line(attribute, &join_path(parent, attribute.name)));
        }
        out.push(String::new());
    }
}

/// Registry-style markdown page: front matter, example usage and the attribute tree.
pub fn render_markdown(data_source: &dyn DataSource, provider_type_name: &str) -> String {
    let type_name = data_source.metadata(provider_type_name);
    let schema = data_source.schema();
    let mut out = Vec::new();

    out.push("---".to_string());
    out.push(format!("page_title: \"{} Data Source\"", type_name));
    out.push("description: |-".to_string());
    out.push(format!("  {}", schema.description));
    out.push("---\n".to_string());
    out.push(format!("# {} (Data Source)\n", type_name));
    out.push(format!("{}\n", schema.markdown_description));

    if let Some(example) = data_source.example() {
        out.push("## Example Usage\n".to_string());
        out.push("```terraform".to_string());
        out.push(format!("data \"{}\" \"example\" {{", type_name));
        out.push(example.to_string());
        out.push("}".to_string());
        out.push("```\n".to_string());
    }

    out.push("## Schema\n".to_string());
    render_attributes(&mut out, &schema.attributes, "", true);

    // Nested schemas follow in depth-first order, each after its parent.
    let mut pending: Vec<(String, &FieldSchema)> = schema
        .attributes
        .iter()
        .rev()
        .map(|a| (a.name.to_string(), a))
        .collect();
    while let Some((path, attribute)) = pending.pop() {
        let children = attribute.attributes();
        if children.is_empty() {
            continue;
        }
        out.push(format!("<a id=\"{}\"></a>", anchor(&path)));
        out.push(format!("### Nested Schema for `{}`\n", path));
        render_attributes(&mut out, children, &path, false);
        for child in children.iter().rev() {
            pending.push((join_path(&path, child.name), child));
        }
    }

    let mut page = out.join("\n");
    while page.ends_with("\n\n") {
        page.pop();
    }
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastore::DataStoreManifestDataSource;

    #[test]
    fn test_render_markdown_for_datastore() {
        let page = render_markdown(&DataStoreManifestDataSource::new(), "k8s");

        assert!(page.starts_with("---\npage_title: \"k8s_kamaji_clastix_io_data_store_v1alpha1_manifest Data Source\""));
        assert!(page.contains("data \"k8s_kamaji_clastix_io_data_store_v1alpha1_manifest\" \"example\" {"));
        assert!(page.contains("### Read-Only\n\n- `id` (String) Contains the value `metadata.name`."));
        assert!(page.contains("- `metadata` (Attributes) Data that helps uniquely identify this object. (see [below for nested schema](#nestedatt--metadata))"));
        assert!(page.contains("<a id=\"nestedatt--spec--tls_config--certificate_authority\"></a>"));
        assert!(page.contains("Value must be one of: etcd, MySQL, PostgreSQL."));
        assert!(page.ends_with('\n'));
    }

    #[test]
    fn test_nested_schemas_follow_their_parent() {
        let page = render_markdown(&DataStoreManifestDataSource::new(), "k8s");
        let position = |needle: &str| {
            page.find(needle)
                .unwrap_or_else(|| panic!("missing {}", needle))
        };

        assert!(position("Nested Schema for `metadata`") < position("Nested Schema for `spec`"));
        assert!(
            position("Nested Schema for `spec.basic_auth`")
                < position("Nested Schema for `spec.basic_auth.username`")
        );
        assert!(
            position("Nested Schema for `spec.basic_auth.username.secret_reference`")
                < position("Nested Schema for `spec.basic_auth.password`")
        );
        assert!(
            position("Nested Schema for `spec.basic_auth.password`")
                < position("Nested Schema for `spec.tls_config`")
        );
    }
}
