/// A template with one section holding `body`, in points on A4.
pub fn single_section(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<report version="1.0">
  <document unit="pt" format="A4">
    <margins top="40" right="40" bottom="40" left="40"/>
  </document>
  <styles>
    <style name="title">
      <fontFamily>Helvetica</fontFamily>
      <fontStyle>B</fontStyle>
      <fontSize>16</fontSize>
      <lineHeight>20</lineHeight>
    </style>
    <style name="th">
      <fontFamily>Helvetica</fontFamily>
      <fontStyle>B</fontStyle>
      <fontSize>10</fontSize>
      <fillColor r="220" g="220" b="220"/>
    </style>
  </styles>
  <sections>
    <section name="main">
{body}
    </section>
  </sections>
</report>"#
    )
}

/// An invoice line-item table: three columns, the last one formatted as currency.
pub fn items_table() -> &'static str {
    r#"<table dataSource="{{.items}}" headerStyle="th" border="true">
        <columns>
          <column header="Description" field="name" width="250"/>
          <column header="Qty" field="qty" width="60" align="C"/>
          <column header="Amount" field="amount" width="100" align="R" format="currency"/>
        </columns>
      </table>"#
}

/// A template with header and footer bands around `body`.
pub fn with_bands(body: &str) -> String {
    format!(
        r#"<report version="1.0">
  <document unit="pt"/>
  <header enabled="true" height="30">
    <text>{{{{.company}}}}</text>
  </header>
  <footer enabled="true" height="30">
    <text align="R">Confidential</text>
  </footer>
  <sections>
    <section name="main">
{body}
    </section>
  </sections>
</report>"#
    )
}
