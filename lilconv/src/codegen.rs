//! Serializes material documents back to the interchange XML.

use quick_xml::escape::escape;
use toon_xml::properties::format_floats;
use toon_xml::{Material, MaterialDocument, Named, Property};

pub fn write_document(doc: &MaterialDocument) -> String {
    let mut lines = vec![String::from("<materials>")];
    for material in &doc.materials {
        lines.extend(material_lines(material));
    }
    lines.push("</materials>".into());
    lines.push(String::new());
    lines.join("\n")
}

fn material_lines(material: &Material) -> Vec<String> {
    let mut lines = vec![];

    let mut open = format!("    <material name=\"{}\"", escape(material.name()));
    if let Some(shader) = &material.shader {
        open += &format!(" shader=\"{}\"", escape(shader));
    }
    if let Some(queue) = material.render_queue {
        open += &format!(" render_queue=\"{queue}\"");
    }
    open += ">";
    lines.push(open);

    for keyword in &material.keywords {
        lines.push(format!("        <keyword name=\"{}\" />", escape(keyword.name())));
    }

    if material.properties.entries.is_empty() {
        lines.push("        <properties />".into());
    } else {
        lines.push("        <properties>".into());
        for property in &material.properties.entries {
            lines.push(format!("            {}", property_line(property)));
        }
        lines.push("        </properties>".into());
    }

    lines.push("    </material>".into());
    lines
}

fn property_line(property: &Property) -> String {
    let name = escape(property.name());
    match property {
        Property::Float(p) => format!("<float name=\"{name}\" value=\"{}\" />", p.value),
        Property::Color(p) => format!("<color name=\"{name}\" value=\"{}\" />", p.value),
        Property::Vector(p) => format!(
            "<vector name=\"{name}\" value=\"{}\" />",
            format_floats(&p.value.to_array())
        ),
        Property::Texture(p) => {
            let texture = match &p.texture {
                Some(tex) => format!(" texture=\"{}\"", escape(tex.path())),
                None => String::new(),
            };
            format!(
                "<texture name=\"{name}\"{texture} offset=\"{}\" scale=\"{}\" />",
                format_floats(&p.offset.to_array()),
                format_floats(&p.scale.to_array()),
            )
        }
    }
}
