//! Extension image manifest templates.
//!
//! The service rejects manifests whose elements are out of schema order, so
//! the templates spell out every element explicitly instead of serializing a
//! struct.

/// Placeholder that promotion replaces with a `<Regions>` element.
pub const REGIONS_PLACEHOLDER: &str = "<!--%REGIONS%-->";

/// Full manifest for a new extension or a new extension version.
pub const EXTENSION_MANIFEST_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<ExtensionImage xmlns="http://schemas.microsoft.com/windowsazure"  xmlns:i="http://www.w3.org/2001/XMLSchema-instance">
  <!-- WARNING: Ordering of fields matter in this file. -->
  <ProviderNameSpace>{{namespace}}</ProviderNameSpace>
  <Type>{{name}}</Type>
  <Version>{{version}}</Version>
  <Label>{{label}}</Label>
  <HostingResources>VmRole</HostingResources>
  <MediaLink>{{media_link}}</MediaLink>
  <Description>{{description}}</Description>
  <IsInternalExtension>true</IsInternalExtension>
  <Eula>{{eula_url}}</Eula>
  <PrivacyUri>{{privacy_url}}</PrivacyUri>
  <HomepageUri>{{homepage_url}}</HomepageUri>
  <IsJsonExtension>true</IsJsonExtension>
  <SupportedOS>{{supported_os}}</SupportedOS>
  <CompanyName>{{company}}</CompanyName>
  <!--%REGIONS%-->
</ExtensionImage>
"#;

/// Minimal manifest that marks an existing version internal again.
pub const UNPUBLISH_MANIFEST_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<ExtensionImage xmlns="http://schemas.microsoft.com/windowsazure"  xmlns:i="http://www.w3.org/2001/XMLSchema-instance">
  <!-- WARNING: Ordering of fields matter in this file. -->
  <ProviderNameSpace>{{namespace}}</ProviderNameSpace>
  <Type>{{name}}</Type>
  <Version>{{version}}</Version>
  <IsInternalExtension>true</IsInternalExtension>
{{#unless xml_extension}}  <IsJsonExtension>true</IsJsonExtension>
{{/unless}}</ExtensionImage>
"#;
