//! Operation extraction
//!
//! Walks the document's paths in order and turns every (path, method) pair
//! into an `OperationDescriptor`:
//! - path-level parameters are merged into each method's list, with the
//!   method-level parameter replacing a path-level one of the same
//!   (name, location)
//! - `$ref` parameters, request bodies and responses are resolved
//! - function names follow the GET getter rule and are collision-checked

use crate::openapi::{
    content_schema, OpenApiSpec, Operation, Parameter, ParameterOrRef, PathItem, RequestBody,
    Response, Schema,
};
use crate::parameter_classifier::ParameterClassifier;
use crate::response_resolver::ResponseResolver;
use crate::schema_tree::SchemaTreeBuilder;
use restgen_common::{
    camelize, capitalize, CollisionKind, CollisionPolicy, GeneratorError, HttpMethod,
    NameAllocator, NamingContext, OperationDescriptor, ParameterLocation, ParameterSpec,
    Primitive, ResponseSpec, Result, TypeExpr,
};

/// A descriptor plus the raw schema of its success response
#[derive(Debug, Clone)]
pub struct ExtractedOperation {
    pub descriptor: OperationDescriptor,

    /// Schema the success response declares, used for entity walking
    pub success_schema: Option<Schema>,
}

/// Builds operation descriptors from one document
pub struct OperationExtractor<'a> {
    spec: &'a OpenApiSpec,
    naming: &'a NamingContext,
    tree: SchemaTreeBuilder<'a>,
    functions: NameAllocator,
    namespaces: NameAllocator,
}

impl<'a> OperationExtractor<'a> {
    pub fn new(spec: &'a OpenApiSpec, naming: &'a NamingContext, policy: CollisionPolicy) -> Self {
        Self {
            spec,
            naming,
            tree: SchemaTreeBuilder::new(spec),
            functions: NameAllocator::new(CollisionKind::Function, policy),
            namespaces: NameAllocator::new(CollisionKind::Namespace, policy),
        }
    }

    /// Extract every operation, paths and methods in document order
    pub fn extract_all(&mut self) -> Result<Vec<ExtractedOperation>> {
        let spec = self.spec;
        let mut extracted = Vec::new();

        for (url, path_item) in &spec.paths {
            for (method, operation) in path_item.operations()? {
                extracted.push(self.extract(url, path_item, method, &operation)?);
            }
        }

        Ok(extracted)
    }

    /// Extract a single operation of `path_item`
    pub fn extract(
        &mut self,
        url: &str,
        path_item: &PathItem,
        method: HttpMethod,
        operation: &Operation,
    ) -> Result<ExtractedOperation> {
        let origin = format!("{} {}", method, url);

        let operation_id = match &operation.operation_id {
            Some(id) if !id.trim().is_empty() => id.clone(),
            _ => synthesize_operation_id(method, url),
        };

        let type_namespace = self
            .namespaces
            .allocate(&self.naming.operation_namespace(&operation_id), &origin)?;
        let function_name = self
            .functions
            .allocate(&self.naming.function_name(&operation_id, method), &origin)?;

        let parameters = self.merge_parameters(&path_item.parameters, &operation.parameters)?;
        let request_body = match &operation.request_body {
            Some(body) => self.request_body_type(body)?,
            None => None,
        };

        let mut responses = Vec::with_capacity(operation.responses.len());
        let mut schemas = Vec::with_capacity(operation.responses.len());
        for (status, response) in &operation.responses {
            let response = self.resolve_response(response)?;
            let schema = content_schema(&response.content);
            responses.push(ResponseSpec {
                status: status.clone(),
                body: schema.map(|s| self.tree.to_type_expr(s)).transpose()?,
            });
            schemas.push(schema.cloned());
        }

        let success = ResponseResolver::resolve(self.naming, &type_namespace, &responses);
        let success_schema = success.as_ref().and_then(|success| {
            responses
                .iter()
                .position(|r| r.status == success.status)
                .and_then(|index| schemas[index].clone())
        });

        let classified = ParameterClassifier::new(self.naming).classify(
            &type_namespace,
            url,
            &parameters,
            request_body,
        );

        Ok(ExtractedOperation {
            descriptor: OperationDescriptor {
                operation_id,
                type_namespace,
                function_name,
                method,
                url_template: url.to_string(),
                path_params: classified.path_params,
                query_params: classified.query_params,
                request_body: classified.request_body,
                responses,
                success,
                presence: classified.presence,
                input_args: classified.input_args,
                path_placeholders: classified.path_placeholders,
            },
            success_schema,
        })
    }

    fn merge_parameters(
        &self,
        shared: &[ParameterOrRef],
        own: &[ParameterOrRef],
    ) -> Result<Vec<ParameterSpec>> {
        let mut merged: Vec<ParameterSpec> = Vec::new();

        for param in shared.iter().chain(own) {
            let param = self.parameter_spec(param)?;
            match merged
                .iter_mut()
                .find(|p| p.name == param.name && p.location == param.location)
            {
                Some(existing) => *existing = param,
                None => merged.push(param),
            }
        }

        Ok(merged)
    }

    fn parameter_spec(&self, param: &ParameterOrRef) -> Result<ParameterSpec> {
        let param: &Parameter = match param {
            ParameterOrRef::Parameter(param) => param,
            ParameterOrRef::Reference { ref_path } => {
                self.spec.resolve_parameter_ref(ref_path).ok_or_else(|| {
                    GeneratorError::DocumentLoad(format!(
                        "Unresolved parameter reference: {}",
                        ref_path
                    ))
                })?
            }
        };

        let location = parse_location(&param.location).ok_or_else(|| {
            GeneratorError::DocumentLoad(format!(
                "Parameter '{}' has unknown location '{}'",
                param.name, param.location
            ))
        })?;

        let ty = match &param.schema {
            Some(schema) => self.tree.to_type_expr(schema)?,
            None => TypeExpr::Primitive(Primitive::Any),
        };

        Ok(ParameterSpec {
            name: param.name.clone(),
            location,
            // path parameters are always required
            required: param.required || location == ParameterLocation::Path,
            ty,
        })
    }

    fn request_body_type(&self, body: &RequestBody) -> Result<Option<TypeExpr>> {
        let body = match &body.ref_path {
            Some(ref_path) => self.spec.resolve_request_body_ref(ref_path).ok_or_else(|| {
                GeneratorError::DocumentLoad(format!(
                    "Unresolved request body reference: {}",
                    ref_path
                ))
            })?,
            None => body,
        };

        if body.content.is_empty() {
            return Ok(None);
        }

        match content_schema(&body.content) {
            Some(schema) => Ok(Some(self.tree.to_type_expr(schema)?)),
            None => Ok(Some(TypeExpr::Primitive(Primitive::Any))),
        }
    }

    fn resolve_response<'r>(&self, response: &'r Response) -> Result<&'r Response>
    where
        'a: 'r,
    {
        match &response.ref_path {
            Some(ref_path) => self.spec.resolve_response_ref(ref_path).ok_or_else(|| {
                GeneratorError::DocumentLoad(format!("Unresolved response reference: {}", ref_path))
            }),
            None => Ok(response),
        }
    }
}

fn parse_location(location: &str) -> Option<ParameterLocation> {
    match location {
        "path" => Some(ParameterLocation::Path),
        "query" => Some(ParameterLocation::Query),
        "header" => Some(ParameterLocation::Header),
        "cookie" => Some(ParameterLocation::Cookie),
        _ => None,
    }
}

/// Operation id for an operation that declares none
///
/// # Examples
/// ```
/// use restgen_common::HttpMethod;
/// use restgen_parser::operation_extractor::synthesize_operation_id;
///
/// assert_eq!(synthesize_operation_id(HttpMethod::Get, "/items/{id}"), "getItemsById");
/// assert_eq!(synthesize_operation_id(HttpMethod::Post, "/user-groups"), "postUserGroups");
/// ```
pub fn synthesize_operation_id(method: HttpMethod, url: &str) -> String {
    let mut id = method.as_str().to_string();

    for segment in url.split('/').filter(|s| !s.is_empty()) {
        match segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
        {
            Some(param) => {
                id.push_str("By");
                id.push_str(&capitalize(&camelize(param)));
            }
            None => id.push_str(&capitalize(&camelize(segment))),
        }
    }

    id
}
